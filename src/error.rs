//! Error types for MZproject session state.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for MZproject operations.
pub type Result<T> = std::result::Result<T, ProjectError>;

/// Errors that can occur while managing a project session.
///
/// Lookups that find nothing are not errors: they come back as `None`,
/// an empty `Vec` or `false`.
#[derive(Error, Debug)]
pub enum ProjectError {
    // Data Source Errors
    #[error("Failed to release raw data file '{name}': {source}")]
    DataSourceRelease {
        name: String,
        #[source]
        source: io::Error,
    },

    // Configuration Errors
    #[error("Failed to read config file: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl ProjectError {
    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ProjectError::DataSourceRelease { .. } => Some(
                "The file was removed from the project but its resources may still be held.",
            ),
            ProjectError::ConfigRead { .. } => Some("Check the config file path and try again."),
            ProjectError::ConfigParse(_) => Some("The config file must be a JSON object."),
            ProjectError::InvalidConfig { .. } => {
                Some("Fix the reported config field or remove it to use the default.")
            }
        }
    }
}
