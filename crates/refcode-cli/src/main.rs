use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::{ColoredString, Colorize};
use tracing_subscriber::EnvFilter;

use refcode_core::config::Config;
use refcode_core::{
    CatalogLoader, DecodeResult, Decoded, RefcodeError, ReferenceDecoder, Resolution, Result,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    let catalog_dir = cli.catalog_dir;

    let result = match cli.command {
        Some(Commands::Decode { references, json }) => {
            handle_decode(&base_dir, catalog_dir, &references, json).await
        }
        Some(Commands::Categories) => handle_categories(&base_dir, catalog_dir).await,
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings, raised or lowered by --verbose/--quiet
fn init_tracing(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "refcode", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("REFCODE_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".refcode"))
        .unwrap_or_else(|| PathBuf::from(".refcode"))
}

/// Catalog loader from config, with the CLI directory taking priority
fn catalog_loader(base_dir: &Path, catalog_dir: Option<PathBuf>) -> Result<CatalogLoader> {
    let config = Config::load(base_dir)?;
    let loader = CatalogLoader::from_config(&config, base_dir);
    Ok(match catalog_dir {
        Some(dir) => loader.with_dir(dir),
        None => loader,
    })
}

async fn handle_decode(
    base_dir: &Path,
    catalog_dir: Option<PathBuf>,
    references: &[String],
    json: bool,
) -> Result<()> {
    let report = catalog_loader(base_dir, catalog_dir)?.load().await?;
    let decoder = ReferenceDecoder::new(&report.store);

    let results: Vec<DecodeResult> = references.iter().map(|r| decoder.decode(r)).collect();

    if json {
        let output = match results.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        println!("{}", output);
    } else {
        for (reference, result) in references.iter().zip(&results) {
            match result {
                DecodeResult::Decoded(decoded) => print_decoded(reference, decoded),
                DecodeResult::NoMatch(_) => {
                    println!();
                    println!(
                        "{} {}",
                        reference.trim().bold(),
                        "(no matching category)".yellow()
                    );
                }
            }
        }
        println!();
    }

    match results.into_iter().find_map(|r| match r {
        DecodeResult::NoMatch(miss) => Some(miss),
        DecodeResult::Decoded(_) => None,
    }) {
        Some(miss) => Err(RefcodeError::NoCategoryMatch {
            reference: miss.reference,
        }),
        None => Ok(()),
    }
}

fn print_decoded(reference: &str, decoded: &Decoded) {
    println!();
    println!("{}", reference.trim().to_uppercase().bold());

    let marker = if decoded.had_leading_marker {
        ", leading I".dimmed().to_string()
    } else {
        String::new()
    };
    println!(
        "  Category: {} (prefix {}{})",
        decoded.category_id.cyan(),
        decoded.prefix.yellow(),
        marker
    );

    let parsed = &decoded.parsed;
    if !parsed.segments.is_empty() {
        let name_width = parsed
            .segments
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0);
        let code_width = parsed
            .segments
            .iter()
            .map(|s| s.code.len())
            .max()
            .unwrap_or(0);

        println!("  Segments:");
        for segment in &parsed.segments {
            println!(
                "    {:<name_width$}  {:<code_width$}  {}",
                segment.name,
                segment.code.bold(),
                meaning_style(&segment.meaning, segment.resolution),
            );
        }
    }

    if !parsed.options.is_empty() {
        let code_width = parsed
            .options
            .iter()
            .map(|o| o.code.len())
            .max()
            .unwrap_or(0);

        println!("  Options:");
        for option in &parsed.options {
            let meaning = if option.known {
                option.meaning.normal()
            } else {
                option.meaning.red()
            };
            println!("    {:<code_width$}  {}", option.code.bold(), meaning);
        }
    }

    if !parsed.leftover.is_empty() {
        println!("  Leftover: {}", parsed.leftover.red());
    }
}

fn meaning_style(meaning: &str, resolution: Resolution) -> ColoredString {
    match resolution {
        Resolution::Mapped => meaning.normal(),
        Resolution::Unknown => meaning.red(),
        _ if resolution.is_known() => meaning.italic(),
        _ => meaning.dimmed(),
    }
}

async fn handle_categories(base_dir: &Path, catalog_dir: Option<PathBuf>) -> Result<()> {
    let loader = catalog_loader(base_dir, catalog_dir)?;
    let report = loader.load().await?;

    println!();
    println!("Catalog: {}", loader.dir().display());

    if report.store.is_empty() {
        println!("No categories loaded.");
    } else {
        println!();
        println!("Categories (match order):");
        println!();
        for (id, category) in report.store.iter() {
            println!("  {}", id.cyan().bold());
            println!("    Prefixes: {}", category.prefixes.join(", "));
            println!(
                "    Blocks: {}, Options: {}",
                category.structure.len(),
                category.options.len()
            );
        }
    }

    if !report.skipped.is_empty() {
        println!();
        println!("{}", "Skipped resources:".yellow().bold());
        for skipped in &report.skipped {
            println!("  {} {}", skipped.resource.yellow(), skipped.error.to_string().dimmed());
        }
    }

    let collisions = report.store.prefix_collisions();
    if !collisions.is_empty() {
        println!();
        println!("{}", "Prefix collisions (first category wins):".yellow().bold());
        for c in collisions {
            println!(
                "  {} {} shadows {} {}",
                c.winner.cyan(),
                c.winner_prefix,
                c.shadowed.cyan(),
                c.shadowed_prefix
            );
        }
    }
    println!();

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(RefcodeError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
