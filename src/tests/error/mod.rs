//! Error type tests.

use std::error::Error;
use std::io;

use crate::error::{ConvertError, ReadError, ReadErrorKind, WriteError};

#[test]
fn read_error_display_names_kind_and_path() {
    let err = ReadError::new(ReadErrorKind::Empty, "/jobs/empty.xml");
    assert_eq!(err.to_string(), "[Empty] /jobs/empty.xml");
    assert!(err.source().is_none());
}

#[test]
fn read_error_keeps_its_cause() {
    let err = ReadError::new(ReadErrorKind::NotReadable, "job.xml")
        .with_source(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

    assert_eq!(err.kind(), ReadErrorKind::NotReadable);
    assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("denied"));
}

#[test]
fn write_and_convert_errors_render_their_context() {
    let err = WriteError::NotWritable {
        path: "/readonly/job.xml".into(),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().contains("/readonly/job.xml"));
    assert!(err.source().is_some());

    assert_eq!(
        ConvertError::UnknownConverter("mzXML".into()).to_string(),
        "Unknown converter id: mzXML"
    );
    let io_err: ConvertError = io::Error::other("disk full").into();
    assert!(matches!(io_err, ConvertError::Io(_)));
}

#[cfg(feature = "miette")]
mod diagnostics {
    use miette::Diagnostic;

    use crate::error::{JobDiagnostic, ReadError, ReadErrorKind};

    #[test]
    fn read_error_becomes_a_diagnostic_with_help() {
        let diag = JobDiagnostic::from(ReadError::new(ReadErrorKind::NotFound, "job.xml"));

        assert!(diag.message.contains("job.xml"));
        assert!(diag.message.contains("NotFound"));
        assert_eq!(diag.severity(), Some(miette::Severity::Error));
        assert!(diag.help().is_some());
    }

    #[test]
    fn read_error_converts_into_a_report() {
        let report: miette::Report =
            ReadError::new(ReadErrorKind::Malformed, "broken.xml").into();
        assert!(report.to_string().contains("broken.xml"));
    }
}
