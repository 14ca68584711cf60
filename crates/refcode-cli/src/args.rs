use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "refcode")]
#[command(about = "Decode vendor product reference codes using category definitions")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.refcode)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Catalog directory (overrides catalog.dir from config)
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode one or more references
    Decode {
        /// References to decode (e.g., DS-2CD2T47G2-L)
        #[arg(required = true)]
        references: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List loaded categories
    Categories,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., catalog.dir)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., catalog.resources)
        key: String,

        /// Value to set (e.g., "IPCamera.json,NVR.json" or "[IPCamera.json, NVR.json]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
