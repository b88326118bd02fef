//! Errors raised while loading settings.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load stored settings or trailer configuration.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    /// The configured settings file does not exist.
    #[error("settings file missing: {path}")]
    MissingFile {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The settings file exists but could not be read.
    #[error("failed to read settings {path}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for the expected layout.
    #[error("failed to parse settings {path}")]
    ParseToml {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
    /// The settings file is not valid JSON for the expected layout.
    #[error("failed to parse settings {path}")]
    ParseJson {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// An environment override is not a valid URL.
    #[error("invalid {key} '{value}'")]
    InvalidUrl {
        /// Environment variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// URL parser error.
        #[source]
        source: url::ParseError,
    },
}
