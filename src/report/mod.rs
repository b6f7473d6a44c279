//! Report generation for processed mass spectra.
//!
//! This module provides:
//! - `ReportGenerator`: Trait for report suppliers
//! - `ReportRegistry`: Registry resolving report suppliers by id
//! - `SummaryReport`: Plain-text summary, one line per collection

use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ConvertError;
use crate::model::MassSpectra;
use crate::monitor::ProgressMonitor;
use crate::processing::ProcessingInfo;

const DESCRIPTION: &str = "Mass Spectrum Report";

/// Trait for report suppliers.
pub trait ReportGenerator: Send + Sync + Debug {
    /// Identifier referenced by `ReportEntry::report_supplier_id`.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Write a report for `spectra` to `path`, appending when `append` is set
    /// and truncating otherwise.
    fn generate(
        &self,
        path: &Path,
        append: bool,
        spectra: &MassSpectra,
        monitor: &dyn ProgressMonitor,
    ) -> Result<(), ConvertError>;
}

/// Registry of report suppliers, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ReportRegistry {
    generators: Vec<Arc<dyn ReportGenerator>>,
}

impl ReportRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Register a report supplier. A supplier with an already registered id
    /// replaces the previous one.
    pub fn register(&mut self, generator: Arc<dyn ReportGenerator>) {
        if let Some(slot) = self
            .generators
            .iter_mut()
            .find(|g| g.id() == generator.id())
        {
            *slot = generator;
        } else {
            self.generators.push(generator);
        }
    }

    /// Register a report supplier (builder pattern).
    pub fn with_generator(mut self, generator: Arc<dyn ReportGenerator>) -> Self {
        self.register(generator);
        self
    }

    pub fn generator(&self, id: &str) -> Option<&Arc<dyn ReportGenerator>> {
        self.generators.iter().find(|g| g.id() == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.generators.iter().map(|g| g.id().to_string()).collect()
    }

    /// Generate a report with the supplier `supplier_id`.
    ///
    /// Failures are returned as error messages; success adds none.
    pub fn report(
        &self,
        path: &Path,
        append: bool,
        spectra: &MassSpectra,
        supplier_id: &str,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        let Some(generator) = self.generator(supplier_id) else {
            let e = ConvertError::UnknownReportSupplier(supplier_id.to_string());
            warn!(path = %path.display(), "{e}");
            return ProcessingInfo::error(DESCRIPTION, e.to_string());
        };

        match generator.generate(path, append, spectra, monitor) {
            Ok(()) => {
                debug!(path = %path.display(), append, supplier = supplier_id, "report generated");
                ProcessingInfo::new()
            }
            Err(e) => {
                warn!(path = %path.display(), supplier = supplier_id, "report failed: {e}");
                ProcessingInfo::error(
                    DESCRIPTION,
                    format!("The report {} could not be generated: {e}", path.display()),
                )
            }
        }
    }
}

/// Tab-separated summary: name, records, present records, ions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReport;

impl SummaryReport {
    pub const ID: &'static str = "summary";

    pub fn new() -> Self {
        Self
    }

    /// The line written for one collection, without the newline.
    pub fn line(spectra: &MassSpectra) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            spectra.name,
            spectra.len(),
            spectra.valid_count(),
            spectra.ion_count()
        )
    }
}

impl ReportGenerator for SummaryReport {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Summary Report"
    }

    fn generate(
        &self,
        path: &Path,
        append: bool,
        spectra: &MassSpectra,
        _monitor: &dyn ProgressMonitor,
    ) -> Result<(), ConvertError> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(path)?
        };
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", Self::line(spectra))?;
        out.flush()?;
        Ok(())
    }
}

/// Create a registry with the built-in report suppliers.
pub fn default_reports() -> ReportRegistry {
    ReportRegistry::new().with_generator(Arc::new(SummaryReport::new()))
}
