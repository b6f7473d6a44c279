//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ReadError, ReadErrorKind, WriteError};

/// A diagnostic wrapper for job file errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct JobDiagnostic {
    pub message: String,

    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    pub help: Option<String>,

    #[diagnostic(severity)]
    pub severity: Severity,
}

impl From<ReadError> for JobDiagnostic {
    fn from(e: ReadError) -> Self {
        let help = match e.kind {
            ReadErrorKind::NotFound => "Check the job file path",
            ReadErrorKind::NotReadable => "The path must be a readable regular file",
            ReadErrorKind::Empty => "The job file has no content",
            ReadErrorKind::Malformed => {
                "The job file must be a well-formed BatchProcessJob document"
            }
        };
        JobDiagnostic {
            message: format!("Cannot read job file '{}' ({})", e.path.display(), e.kind),
            source: e.source,
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<WriteError> for JobDiagnostic {
    fn from(e: WriteError) -> Self {
        JobDiagnostic {
            message: e.to_string(),
            source: Some(Box::new(e)),
            help: Some("Check that the destination folder exists and is writable".into()),
            severity: Severity::Error,
        }
    }
}

impl From<ReadError> for miette::Report {
    fn from(e: ReadError) -> Self {
        miette::Report::new(JobDiagnostic::from(e))
    }
}
