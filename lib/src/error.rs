extern crate thiserror;

use std::{io, path::PathBuf};

use thiserror::Error;

/// Table loading error.
///
/// Lookups never fail; a missing token is `None`. Every variant here aborts
/// the load it was raised from.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{source_name}:{line}: malformed entry: {reason}")]
    MalformedEntry {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error(
        "{source_name}:{line}: duplicate token {token:?} (first registered at {first_source}:{first_line})"
    )]
    DuplicateToken {
        token: String,
        source_name: String,
        line: usize,
        first_source: String,
        first_line: usize,
    },

    #[error("{source_name}:{line}: entry before any tag= directive")]
    MissingTag { source_name: String, line: usize },

    #[error("{source_name}:{line}: malformed directive: {reason}")]
    MalformedDirective {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("File I/O Error on {}: {kind}", .path.display())]
    Io { path: PathBuf, kind: io::ErrorKind },
}

impl Error {
    pub fn io<P: Into<PathBuf>>(path: P, error: &io::Error) -> Self {
        Self::Io {
            path: path.into(),
            kind: error.kind(),
        }
    }

    /// Line number the error points at, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedEntry { line, .. }
            | Error::DuplicateToken { line, .. }
            | Error::MissingTag { line, .. }
            | Error::MalformedDirective { line, .. } => Some(*line),
            Error::Io { .. } => None,
        }
    }
}
