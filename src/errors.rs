// Error taxonomy for startup resources
//
// Gateway failures stay as `anyhow::Error` with context attached at the
// call site; everything a user can fix by editing a file lands here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParleyError {
    /// A required file does not exist or cannot be read
    #[error("{what} not found: {}", .path.display())]
    MissingResource { what: String, path: PathBuf },

    /// A file exists but its content is unusable
    #[error("{what} at {} is malformed: {reason}", .path.display())]
    MalformedResource {
        what: String,
        path: PathBuf,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown persona: {0}")]
    UnknownPersona(String),
}

impl ParleyError {
    pub fn missing(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingResource {
            what: what.into(),
            path: path.into(),
        }
    }

    pub fn malformed(
        what: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedResource {
            what: what.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Classify a failed file read: only `NotFound` is a missing resource
    pub fn unreadable(
        what: impl Into<String>,
        path: impl Into<PathBuf>,
        err: io::Error,
    ) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::missing(what, path),
            _ => Self::malformed(what, path, err),
        }
    }
}
