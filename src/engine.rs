//! Batch execution engine.
//!
//! For each input entry, in order: load, process, output, report. A failure
//! while loading one input file is recorded and skips the remaining phases of
//! that file only.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::convert::{ConverterRegistry, default_converters};
use crate::model::{BatchJob, InputEntry, MassSpectra};
use crate::monitor::ProgressMonitor;
use crate::processing::ProcessingInfo;
use crate::registry::{ProcessTypeSupport, default_process_support};
use crate::report::{ReportRegistry, default_reports};

const DESCRIPTION: &str = "Batch Processor";

/// Executes batch jobs against a set of registries.
#[derive(Debug, Clone)]
pub struct BatchProcess {
    processors: ProcessTypeSupport,
    converters: ConverterRegistry,
    reports: ReportRegistry,
}

impl Default for BatchProcess {
    fn default() -> Self {
        Self::new(
            default_process_support(),
            default_converters(),
            default_reports(),
        )
    }
}

impl BatchProcess {
    /// Create a new engine from its three registries.
    pub fn new(
        processors: ProcessTypeSupport,
        converters: ConverterRegistry,
        reports: ReportRegistry,
    ) -> Self {
        Self {
            processors,
            converters,
            reports,
        }
    }

    /// Get the processor registry.
    pub fn processors(&self) -> &ProcessTypeSupport {
        &self.processors
    }

    /// Get the converter registry.
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Get the report registry.
    pub fn reports(&self) -> &ReportRegistry {
        &self.reports
    }

    /// Run a job.
    pub fn run(&self, job: &BatchJob, monitor: &dyn ProgressMonitor) -> ProcessingInfo {
        self.execute(Some(job), monitor)
    }

    /// Run a job, if there is one.
    ///
    /// Nothing is executed for `None`; the result holds a single error.
    pub fn execute(
        &self,
        job: Option<&BatchJob>,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        let mut result = ProcessingInfo::new();
        let Some(job) = job else {
            result.add_error_message(DESCRIPTION, "The batch job was null.");
            return result;
        };

        info!(
            inputs = job.input_entries().len(),
            processes = job.process_entries().len(),
            outputs = job.output_entries().len(),
            reports = job.report_entries().len(),
            "executing batch job"
        );
        monitor.begin_task("Batch process", job.input_entries().len());

        for input in job.input_entries() {
            if monitor.is_canceled() {
                warn!("batch process canceled");
                result.add_warn_message(DESCRIPTION, "The batch process has been canceled.");
                break;
            }
            self.process_input(input, job, &mut result, monitor);
            monitor.worked(1);
        }

        result
    }

    fn process_input(
        &self,
        input: &InputEntry,
        job: &BatchJob,
        result: &mut ProcessingInfo,
        monitor: &dyn ProgressMonitor,
    ) {
        let path = Path::new(input.input_file());
        debug!(path = %path.display(), "loading input");

        let mut spectra = match self.converters.load(path, monitor) {
            Ok(spectra) => spectra,
            Err(e) => {
                warn!(path = %path.display(), "load failed: {e}");
                result.add_error_message(
                    DESCRIPTION,
                    format!(
                        "A failure occurred loading the mass spectra: {} ({e})",
                        path.display()
                    ),
                );
                return;
            }
        };

        self.process_spectra(&mut spectra, job, result, monitor);
        self.write_outputs(&spectra, job, result, monitor);
        self.write_reports(&spectra, job, result, monitor);

        result.add_info_message(
            DESCRIPTION,
            format!("The file has been processed successfully: {}", path.display()),
        );
    }

    fn process_spectra(
        &self,
        spectra: &mut MassSpectra,
        job: &BatchJob,
        result: &mut ProcessingInfo,
        monitor: &dyn ProgressMonitor,
    ) {
        for entry in job.process_entries() {
            for spectrum in spectra.spectra.iter_mut() {
                match spectrum {
                    Some(spectrum) => {
                        let info = self.processors.apply_processor(spectrum, entry, monitor);
                        result.add_messages(info);
                    }
                    None => {
                        result.add_error_message(DESCRIPTION, "The mass spectrum must not be null.")
                    }
                }
            }
        }
    }

    fn write_outputs(
        &self,
        spectra: &MassSpectra,
        job: &BatchJob,
        result: &mut ProcessingInfo,
        monitor: &dyn ProgressMonitor,
    ) {
        for output in job.output_entries() {
            let destination = output_destination(output.output_folder(), &spectra.name);
            debug!(
                path = %destination.display(),
                converter = output.converter_id(),
                "writing output"
            );
            result.add_messages(self.converters.write(
                &destination,
                spectra,
                output.converter_id(),
                monitor,
            ));
        }
    }

    fn write_reports(
        &self,
        spectra: &MassSpectra,
        job: &BatchJob,
        result: &mut ProcessingInfo,
        monitor: &dyn ProgressMonitor,
    ) {
        for report in job.report_entries() {
            let (destination, append) =
                report_destination(report.report_folder_or_file(), &spectra.name);
            debug!(path = %destination.display(), append, "writing report");
            result.add_messages(self.reports.report(
                &destination,
                append,
                spectra,
                report.report_supplier_id(),
                monitor,
            ));
        }
    }
}

/// Append the platform separator to `folder` unless it already ends with one.
pub fn normalize_folder(folder: &str) -> String {
    let mut folder = folder.to_string();
    if !folder.ends_with(MAIN_SEPARATOR) {
        folder.push(MAIN_SEPARATOR);
    }
    folder
}

/// Output file for a collection: normalized folder followed by the name.
pub fn output_destination(folder: &str, name: &str) -> PathBuf {
    PathBuf::from(normalize_folder(folder) + name)
}

/// Report file for a collection and whether to append to it.
///
/// An existing directory gets a fresh file named after the collection; any
/// other path is used as is and appended to.
pub fn report_destination(folder_or_file: &str, name: &str) -> (PathBuf, bool) {
    if Path::new(folder_or_file).is_dir() {
        (output_destination(folder_or_file, name), false)
    } else {
        (PathBuf::from(folder_or_file), true)
    }
}
