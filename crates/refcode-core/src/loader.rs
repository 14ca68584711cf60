//! Catalog Loader
//!
//! Reads category resources from a catalog directory. Every resource is read
//! and parsed on its own task; a resource that fails is logged and reported in
//! [`LoadReport::skipped`] without affecting the others. The resulting store
//! follows the order of the resource list, whatever order the tasks finish in.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::category::{CategoryDefinition, CategoryStore};
use crate::config::Config;
use crate::decode::{decode, DecodeResult};
use crate::error::{RefcodeError, Result};

/// Resource file extension used when discovering a catalog
const RESOURCE_EXTENSION: &str = "json";

/// Product family resources loaded when none are configured
pub const DEFAULT_RESOURCES: &[&str] = &[
    "IPCamera.json",
    "NVR.json",
    "TurboHD.json",
    "TurboHD_DVR.json",
    "PTZ.json",
    "TurboHDPTZ.json",
    "Switch.json",
    "AccessPoint.json",
    "ACRouter.json",
    "Speaker.json",
    "HiLookIPC.json",
    "HiLookTHC.json",
    "HiLookPTZ.json",
    "HiLookNVR.json",
    "HiLookDVR.json",
    "HiLookKit.json",
];

/// A resource left out of the store
#[derive(Debug)]
pub struct SkippedResource {
    pub resource: String,
    pub error: RefcodeError,
}

/// Outcome of a catalog load
#[derive(Debug, Default)]
pub struct LoadReport {
    pub store: CategoryStore,
    pub skipped: Vec<SkippedResource>,
}

/// Loads a fixed list of resources from one directory
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    dir: PathBuf,
    /// Empty means every `*.json` in `dir`, sorted by name
    resources: Vec<String>,
}

impl CatalogLoader {
    pub fn new(dir: impl Into<PathBuf>, resources: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            resources,
        }
    }

    /// Loader for the default product family resources
    pub fn with_default_resources(dir: impl Into<PathBuf>) -> Self {
        Self::new(
            dir,
            DEFAULT_RESOURCES.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Loader configured by the `[catalog]` section
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        Self::new(
            config.catalog_dir(base_dir),
            config.catalog.resources.clone(),
        )
    }

    /// Use a different catalog directory, keeping the resource list
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resource names to load, discovering them when none are configured
    pub async fn resource_names(&self) -> Result<Vec<String>> {
        if !self.resources.is_empty() {
            return Ok(self.resources.clone());
        }

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RESOURCE_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        debug!(dir = %self.dir.display(), count = names.len(), "discovered catalog resources");
        Ok(names)
    }

    /// Load every resource concurrently
    pub async fn load(&self) -> Result<LoadReport> {
        let is_dir = tokio::fs::metadata(&self.dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(RefcodeError::CatalogNotFound {
                path: self.dir.clone(),
            });
        }

        let handles: Vec<_> = self
            .resource_names()
            .await?
            .into_iter()
            .map(|name| {
                let path = self.dir.join(&name);
                let task_name = name.clone();
                let handle = tokio::spawn(async move { read_resource(&path, task_name).await });
                (name, handle)
            })
            .collect();

        let mut report = LoadReport::default();
        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(RefcodeError::LoaderTask {
                    resource: name.clone(),
                    message: e.to_string(),
                }),
            };

            match outcome {
                Ok(def) => {
                    debug!(resource = %name, prefixes = def.prefixes.len(), "loaded category");
                    report.store.insert(name, def);
                }
                Err(error) => {
                    warn!(resource = %name, error = %error, "skipping category resource");
                    report.skipped.push(SkippedResource {
                        resource: name,
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}

async fn read_resource(path: &Path, resource: String) -> Result<CategoryDefinition> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(source) => return Err(RefcodeError::ResourceRead { resource, source }),
    };
    serde_json::from_str(&content)
        .map_err(|source| RefcodeError::InvalidResource { resource, source })
}

/// Load the catalog and decode a single reference
pub async fn analyze(reference: &str, loader: &CatalogLoader) -> Result<DecodeResult> {
    let report = loader.load().await?;
    Ok(decode(reference, &report.store))
}
