//! Error types for reading, writing and converting.
//!
//! This module provides:
//! - `ReadError`: A failed job read, tagged with a `ReadErrorKind`
//! - `WriteError`: A failed job write
//! - `ConvertError`: A failure reported by a converter or report generator
//!
//! Execution never returns these directly; collaborator failures are turned
//! into messages of a `ProcessingInfo`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a job file could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadErrorKind {
    /// The file does not exist
    NotFound,
    /// The path exists but cannot be read as a file
    NotReadable,
    /// The file has no content
    Empty,
    /// The content is not a well-formed job document
    Malformed,
}

impl fmt::Display for ReadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadErrorKind::NotFound => write!(f, "NotFound"),
            ReadErrorKind::NotReadable => write!(f, "NotReadable"),
            ReadErrorKind::Empty => write!(f, "Empty"),
            ReadErrorKind::Malformed => write!(f, "Malformed"),
        }
    }
}

#[derive(Debug, Error)]
#[error("[{kind}] {}", .path.display())]
pub struct ReadError {
    pub kind: ReadErrorKind,
    /// The job file, or "-" when reading from memory
    pub path: PathBuf,
    /// The underlying error, if any
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ReadError {
    pub fn new(kind: ReadErrorKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            source: None,
        }
    }

    /// Attach the lower-level cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ReadErrorKind {
        self.kind
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    /// The destination could not be opened for writing
    #[error("Cannot open '{}' for writing: {source}", .path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Emitting the document failed
    #[error("Encoding error: {0}")]
    Encode(Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by spectrum converters and report generators.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No registered converter accepts the file
    #[error("No converter can import: {}", .0.display())]
    NoConverter(PathBuf),

    #[error("Unknown converter id: {0}")]
    UnknownConverter(String),

    #[error("Unknown report supplier id: {0}")]
    UnknownReportSupplier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding of the data format failed
    #[error("Format error: {0}")]
    Format(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
