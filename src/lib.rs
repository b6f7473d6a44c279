//! # msbatch
//!
//! Declarative batch processing of mass-spectrum files.
//!
//! ## Overview
//!
//! msbatch provides:
//! - **Job model**: Ordered input, process, output and report entries
//! - **Job format**: Reading and writing `BatchProcessJob` XML documents
//! - **Processor registry**: Dispatch of process entries by category and id
//! - **Execution engine**: Runs a job file by file, accumulating messages
//!   instead of aborting on a single failing entry
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use msbatch::{BatchJobReader, BatchProcess, NullProgressMonitor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let monitor = NullProgressMonitor;
//!     let job = BatchJobReader::new().read("job.xml", &monitor)?;
//!
//!     let result = BatchProcess::default().run(&job, &monitor);
//!     for message in result.messages() {
//!         println!("{message}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Extending
//!
//! Processors, converters and report suppliers are registered explicitly:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use msbatch::registry::{
//!     BaselineCorrectionSupplier, BaselineCorrectionSupport, BaselineCorrectionTypeSupplier,
//!     ProcessTypeSupport,
//! };
//!
//! let corrections = BaselineCorrectionSupport::new().with_correction(
//!     BaselineCorrectionSupplier::new("flat", "Subtracts the minimum", "Flat Baseline"),
//!     Arc::new(my_correction),
//! );
//! let processors = ProcessTypeSupport::new()
//!     .with_supplier(Arc::new(BaselineCorrectionTypeSupplier::new(corrections)));
//! ```
//!
//! ## Features
//!
//! - `json` - JSON mass-spectrum converter (enabled by default)
//! - `miette` - Pretty error reporting with miette

// Core modules
pub mod convert;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod monitor;
pub mod processing;
pub mod registry;
pub mod report;

// Re-exports for convenience
#[cfg(feature = "json")]
pub use convert::JsonConverter;
pub use convert::{ConverterRegistry, SpectrumConverter, default_converters};
pub use engine::BatchProcess;
pub use error::{ConvertError, ReadError, ReadErrorKind, WriteError};
pub use io::{BatchJobReader, BatchJobWriter};
pub use model::{
    BatchJob, InputEntry, Ion, MassSpectra, MassSpectrum, OutputEntry, ProcessEntry, ReportEntry,
};
pub use monitor::{CancellationToken, NullProgressMonitor, ProgressMonitor};
pub use processing::{MessageType, ProcessingInfo, ProcessingMessage};
pub use registry::{ProcessTypeSupplier, ProcessTypeSupport, default_process_support};
pub use report::{ReportGenerator, ReportRegistry, SummaryReport, default_reports};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::JobDiagnostic;

/// Read a job file and run it with the default engine.
///
/// Only a failure to read the job is returned as an error; everything that
/// goes wrong during execution is reported in the returned `ProcessingInfo`.
pub fn run_job_file(
    path: impl AsRef<std::path::Path>,
    monitor: &dyn ProgressMonitor,
) -> Result<ProcessingInfo, ReadError> {
    let job = BatchJobReader::new().read(path, monitor)?;
    Ok(BatchProcess::default().run(&job, monitor))
}
