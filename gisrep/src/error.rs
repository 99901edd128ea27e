//! Error types used throughout the library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the gisrep library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GisrepError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Template parsing or rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// Template not found
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Output sink not found
    #[error("Output not found: {0}")]
    OutputNotFound(String),

    /// Output sink failed to publish the report
    #[error("Output error: {0}")]
    Output(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file already exists and `force` was not given
    #[error("Configuration error: config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    /// Config file does not exist
    #[error("Configuration error: config file doesn't exist: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Credential lookup or storage failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Issue tracker API call failed
    #[error("API error: {0}")]
    Api(String),

    /// The query matched no issues
    #[error("No matching issues found")]
    NoIssues,

    /// TOML serialization error
    #[error("Serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// TOML deserialization error
    #[error("Serialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// YAML front matter error
    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gisrep operations
pub type Result<T> = std::result::Result<T, GisrepError>;
