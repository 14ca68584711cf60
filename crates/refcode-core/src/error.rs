use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefcodeError {
    #[error("No matching category for reference: {reference}")]
    NoCategoryMatch { reference: String },

    #[error("Catalog directory does not exist: {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("Invalid category resource '{resource}': {source}")]
    InvalidResource {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read category resource '{resource}': {source}")]
    ResourceRead {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Loader task failed for '{resource}': {message}")]
    LoaderTask { resource: String, message: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, RefcodeError>;

impl RefcodeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCategoryMatch { .. } => 2,
            Self::CatalogNotFound { .. } => 3,
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = RefcodeError::NoCategoryMatch {
            reference: "XYZ".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "No matching category for reference: XYZ");

        let err = RefcodeError::CatalogNotFound {
            path: PathBuf::from("/nowhere"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = RefcodeError::ConfigKeyNotFound {
            key: "catalog.x".to_string(),
        };
        assert_eq!(err.exit_code(), 4);
    }
}
