use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RefcodeError, Result};
use crate::loader::DEFAULT_RESOURCES;

const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CATALOG_DIR: &str = "json";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# refcode configuration file
# Location: ~/.refcode/config.toml

[catalog]
# Directory holding the category resources (*.json)
# Relative paths are resolved against the directory of this file
# Default: "json"
dir = "json"

# Resources to load, in match order: the first category whose prefix
# matches a reference wins, so list more specific families first.
# Set to [] to load every *.json file in `dir`, sorted by file name.
resources = [
    "IPCamera.json", "NVR.json", "TurboHD.json", "TurboHD_DVR.json",
    "PTZ.json", "TurboHDPTZ.json", "Switch.json", "AccessPoint.json",
    "ACRouter.json", "Speaker.json", "HiLookIPC.json", "HiLookTHC.json",
    "HiLookPTZ.json", "HiLookNVR.json", "HiLookDVR.json", "HiLookKit.json",
]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Category catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog directory
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Resource names in match order
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,
}

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_DIR)
}

fn default_resources() -> Vec<String> {
    DEFAULT_RESOURCES.iter().map(|s| s.to_string()).collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            resources: default_resources(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| RefcodeError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Catalog directory, resolved against `base_dir` when relative
    pub fn catalog_dir(&self, base_dir: &Path) -> PathBuf {
        if self.catalog.dir.is_absolute() {
            self.catalog.dir.clone()
        } else {
            base_dir.join(&self.catalog.dir)
        }
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog.dir" => Some(self.catalog.dir.display().to_string()),
            "catalog.resources" => Some(format!("{:?}", self.catalog.resources)),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.dir" => {
                self.catalog.dir = PathBuf::from(value.trim());
                Ok(())
            }
            "catalog.resources" => {
                self.catalog.resources = parse_string_list(value);
                Ok(())
            }
            _ => Err(RefcodeError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["catalog.dir", "catalog.resources"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_string_list_comma() {
        let result = parse_string_list("IPCamera.json,NVR.json");
        assert_eq!(result, vec!["IPCamera.json", "NVR.json"]);
    }

    #[test]
    fn test_parse_string_list_json() {
        let result = parse_string_list(r#"["IPCamera.json", "NVR.json"]"#);
        assert_eq!(result, vec!["IPCamera.json", "NVR.json"]);
    }

    #[test]
    fn test_parse_string_list_empty() {
        assert!(parse_string_list("[]").is_empty());
        assert!(parse_string_list("").is_empty());
    }

    #[test]
    fn test_default_resources() {
        let config = Config::default();
        assert_eq!(config.catalog.resources.len(), DEFAULT_RESOURCES.len());
        assert_eq!(config.catalog.resources[0], "IPCamera.json");
        assert_eq!(config.catalog.dir, PathBuf::from("json"));
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();

        config.set("catalog.resources", "NVR.json,PTZ.json").unwrap();
        assert_eq!(config.catalog.resources, vec!["NVR.json", "PTZ.json"]);

        config.set("catalog.dir", "/srv/catalog").unwrap();
        assert_eq!(config.get("catalog.dir").unwrap(), "/srv/catalog");

        let err = config.set("catalog.nope", "x").unwrap_err();
        assert!(matches!(err, RefcodeError::ConfigKeyNotFound { .. }));
        assert_eq!(config.list().len(), 2);
    }

    #[test]
    fn test_catalog_dir_resolution() {
        let base = Path::new("/home/user/.refcode");
        let mut config = Config::default();
        assert_eq!(config.catalog_dir(base), base.join("json"));

        config.catalog.dir = PathBuf::from("/srv/catalog");
        assert_eq!(config.catalog_dir(base), PathBuf::from("/srv/catalog"));
    }

    #[test]
    fn test_init_template_loads_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = Config::init(dir.path()).unwrap();
        assert!(path.exists());

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.catalog.resources, default_resources());
        assert_eq!(config.catalog.dir, PathBuf::from("json"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.catalog.resources = vec!["Switch.json".to_string()];
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.catalog.resources, vec!["Switch.json"]);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(Config::path(dir.path()), "[catalog\n").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, RefcodeError::ConfigParse { .. }));
    }
}
