//! Driver-level errors

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::{LexError, ParseFailure};

/// The result of a corec driver operation.
pub type CorecResult<T> = Result<T, CorecError>;

/// An error that stops a driver command.
#[derive(Debug, Error)]
pub enum CorecError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file does not carry the required extension.
    #[error("{path}: expected a .{expected} source file")]
    WrongExtension { path: PathBuf, expected: String },

    /// A record in a token interchange file could not be read.
    #[error("{path}:{line}: malformed token record: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Scanning reported lexical errors.
    #[error("scanning failed with {} lexical error(s)", .0.len())]
    Scan(Vec<LexError>),

    /// Parsing reported syntax errors.
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}
