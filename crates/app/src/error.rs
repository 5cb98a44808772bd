//! Error types for the command-line layer.
//!
//! Engine errors pass through unchanged; this layer adds file, syntax and
//! usage failures. Any of them ends the run with exit code 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Error raised by the machine engine
    #[error(transparent)]
    Engine(#[from] enigma_core::Error),

    /// File could not be opened, read or written
    #[error("could not access {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stream I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file ended early
    #[error("configuration file truncated")]
    Truncated,

    /// Malformed configuration or setting line
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Message seen before any setting directive
    #[error("no configuration: input must start with a '*' setting line")]
    NoConfiguration,

    /// Invalid command line
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        AppError::Syntax {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
