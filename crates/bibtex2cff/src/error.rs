//! Error types for bibtex2cff

use std::path::PathBuf;

use cff_bibtex::ParseError;
use cff_domain::ValidationError;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Main error type for a conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Entry type outside software, dataset and misc
    #[error("unsupported BibTeX entry type `{0}` (expected software, dataset or misc)")]
    UnsupportedEntryType(String),

    #[error("BibTeX record has no entry type")]
    MissingEntryType,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to parse BibTeX: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
