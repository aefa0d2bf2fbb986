use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading, writing or validating the scanner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no per-user configuration directory is available on this system")]
    NoConfigDir,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
