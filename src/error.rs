extern crate thiserror;

use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] IoError),

    #[error("Table Error: {0}")]
    Table(#[from] nametag::Error),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("Worker Error: {0}")]
    Worker(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

/// Configuration error.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("File I/O Error on {}: {1}", .0.display())]
    File(PathBuf, io::ErrorKind),

    #[error("Parse Error: {0}")]
    Parse(String),
}

/// I/O errors.
#[derive(Debug, Error, PartialEq)]
pub enum IoError {
    #[error("File Error on {}: {1}", .0.display())]
    File(PathBuf, io::ErrorKind),

    #[error("Reader Error: {0}")]
    Reader(io::ErrorKind),
}
