//! Error types for kanadrill

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for kanadrill
#[derive(Debug, Error)]
pub enum DrillError {
    /// No syllables or readings are enabled, so no queue can be built
    #[error("Nothing to practice: no items are enabled")]
    EmptyPool,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Deck file or deck content error
    #[error("Deck error: {0}")]
    Deck(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DrillError>,
    },
}

impl DrillError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DrillError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for DrillError {
    fn from(err: toml::de::Error) -> Self {
        DrillError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for DrillError {
    fn from(err: toml::ser::Error) -> Self {
        DrillError::Toml(err.to_string())
    }
}

/// Result type alias for kanadrill
pub type Result<T> = std::result::Result<T, DrillError>;
