//! Error handling for the trip unifier.

use std::path::{Path, PathBuf};
use std::{fmt, io};

use arrow::error::ArrowError;

use crate::schema::adapt::AdapterError;

pub mod util;

/// Specialized error type for the trip unifier
#[derive(Debug)]
pub enum TripUnifyError {
    /// Error opening or reading an input file
    IoError {
        context: String,
        path: Option<PathBuf>,
        source: io::Error,
    },
    /// A source could not be mapped onto the canonical schema
    SchemaError(String),
    /// A conversion that is not allowed to degrade to null failed
    CastError(AdapterError),
    /// Error from the Arrow engine while reading or assembling batches
    ArrowError(ArrowError),
    /// Error connecting to or writing into the document store
    SinkError(String),
    /// Invalid runtime configuration
    ConfigError(String),
    /// A blocking task panicked or was cancelled
    TaskError(String),
}

impl TripUnifyError {
    /// Create an I/O error carrying a description of what was being attempted
    pub fn io_error_with_source(context: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            path: None,
            source,
        }
    }

    /// Attach the path an I/O error relates to
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::IoError {
                context, source, ..
            } => Self::IoError {
                context,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaError(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::SinkError(msg.into())
    }

    /// Whether this error happened before anything was sent to the sink
    #[must_use]
    pub fn is_pre_write(&self) -> bool {
        !matches!(self, Self::SinkError(_))
    }
}

impl From<io::Error> for TripUnifyError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source("I/O failure", error)
    }
}

impl From<ArrowError> for TripUnifyError {
    fn from(error: ArrowError) -> Self {
        Self::ArrowError(error)
    }
}

impl From<AdapterError> for TripUnifyError {
    fn from(error: AdapterError) -> Self {
        match error {
            AdapterError::ArrowError(e) => Self::ArrowError(e),
            other => Self::CastError(other),
        }
    }
}

impl From<tokio::task::JoinError> for TripUnifyError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::TaskError(format!("Task join error: {error}"))
    }
}

impl fmt::Display for TripUnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError {
                context,
                path: Some(path),
                source,
            } => write!(f, "IO error: {context} ({}): {source}", path.display()),
            Self::IoError {
                context, source, ..
            } => write!(f, "IO error: {context}: {source}"),
            Self::SchemaError(msg) => write!(f, "Schema error: {msg}"),
            Self::CastError(e) => write!(f, "Cast error: {e}"),
            Self::ArrowError(e) => write!(f, "Arrow error: {e}"),
            Self::SinkError(msg) => write!(f, "Sink error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::TaskError(msg) => write!(f, "Task error: {msg}"),
        }
    }
}

impl std::error::Error for TripUnifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::CastError(e) => Some(e),
            Self::ArrowError(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for trip unifier operations
pub type Result<T> = std::result::Result<T, TripUnifyError>;
