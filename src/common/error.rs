use std::path::Path;

use thiserror::Error;

use crate::handler::PatternError;
use crate::resolve::ResolveError;

/// Result type for seiops operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the operation resolver and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Descriptor error in {path}: {message}")]
    Descriptor { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Schema resolution error for '{location}': {message}")]
    Schema { location: String, message: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl Error {
    /// Create a descriptor error tied to the file (or pseudo-path) it came from
    pub fn descriptor_error(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Descriptor {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a schema resolution error
    pub fn schema_error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            location: location.into(),
            message: message.into(),
        }
    }
}
