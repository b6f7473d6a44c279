//! Baseline-correction processor category.
//!
//! Corrections are installed explicitly into a `BaselineCorrectionSupport`
//! table: a descriptor (id, description, detector name) plus the callable.

use std::sync::Arc;

use thiserror::Error;

use super::ProcessTypeSupplier;
use crate::model::MassSpectrum;
use crate::monitor::ProgressMonitor;
use crate::processing::ProcessingInfo;

pub const CATEGORY: &str = "Baseline Correction";

const DESCRIPTION: &str = "Baseline Correction";
const NO_CORRECTION_AVAILABLE: &str = "There is no baseline correction available.";

/// A baseline-correction algorithm.
pub trait BaselineCorrection: Send + Sync {
    fn set_baseline(
        &self,
        spectrum: &mut MassSpectrum,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo;
}

impl<F> BaselineCorrection for F
where
    F: Fn(&mut MassSpectrum, &dyn ProgressMonitor) -> ProcessingInfo + Send + Sync,
{
    fn set_baseline(
        &self,
        spectrum: &mut MassSpectrum,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        self(spectrum, monitor)
    }
}

/// Descriptor of an installed correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BaselineCorrectionSupplier {
    pub id: String,
    pub description: String,
    pub detector_name: String,
}

impl BaselineCorrectionSupplier {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        detector_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            detector_name: detector_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoBaselineCorrectionAvailable {
    #[error("There is no baseline correction installed.")]
    NoneInstalled,

    #[error("There is no baseline correction available with the id '{0}'.")]
    UnknownId(String),

    #[error("There is no baseline correction available at index {0}.")]
    UnknownIndex(usize),
}

#[derive(Clone)]
struct Installed {
    supplier: BaselineCorrectionSupplier,
    correction: Arc<dyn BaselineCorrection>,
}

/// Ordered table of installed baseline corrections.
#[derive(Clone, Default)]
pub struct BaselineCorrectionSupport {
    installed: Vec<Installed>,
}

impl std::fmt::Debug for BaselineCorrectionSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.installed.iter().map(|i| &i.supplier))
            .finish()
    }
}

impl BaselineCorrectionSupport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a correction.
    pub fn add(
        &mut self,
        supplier: BaselineCorrectionSupplier,
        correction: Arc<dyn BaselineCorrection>,
    ) {
        self.installed.push(Installed {
            supplier,
            correction,
        });
    }

    /// Install a correction (builder pattern).
    pub fn with_correction(
        mut self,
        supplier: BaselineCorrectionSupplier,
        correction: Arc<dyn BaselineCorrection>,
    ) -> Self {
        self.add(supplier, correction);
        self
    }

    fn ensure_installed(&self) -> Result<(), NoBaselineCorrectionAvailable> {
        if self.installed.is_empty() {
            return Err(NoBaselineCorrectionAvailable::NoneInstalled);
        }
        Ok(())
    }

    fn find(&self, correction_id: &str) -> Option<&Installed> {
        if correction_id.is_empty() {
            return None;
        }
        self.installed
            .iter()
            .find(|i| i.supplier.id == correction_id)
    }

    pub fn available_correction_ids(&self) -> Result<Vec<String>, NoBaselineCorrectionAvailable> {
        self.ensure_installed()?;
        Ok(self
            .installed
            .iter()
            .map(|i| i.supplier.id.clone())
            .collect())
    }

    pub fn supplier(
        &self,
        correction_id: &str,
    ) -> Result<&BaselineCorrectionSupplier, NoBaselineCorrectionAvailable> {
        self.ensure_installed()?;
        self.find(correction_id)
            .map(|i| &i.supplier)
            .ok_or_else(|| NoBaselineCorrectionAvailable::UnknownId(correction_id.to_string()))
    }

    pub fn correction_id(&self, index: usize) -> Result<&str, NoBaselineCorrectionAvailable> {
        self.ensure_installed()?;
        self.installed
            .get(index)
            .map(|i| i.supplier.id.as_str())
            .ok_or(NoBaselineCorrectionAvailable::UnknownIndex(index))
    }

    /// Detector names, in installation order.
    pub fn correction_names(&self) -> Result<Vec<String>, NoBaselineCorrectionAvailable> {
        self.ensure_installed()?;
        Ok(self
            .installed
            .iter()
            .map(|i| i.supplier.detector_name.clone())
            .collect())
    }

    /// Run the correction with the given id.
    ///
    /// An unknown id yields an info holding one error message.
    pub fn set_baseline(
        &self,
        spectrum: &mut MassSpectrum,
        correction_id: &str,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        match self.find(correction_id) {
            Some(installed) => installed.correction.set_baseline(spectrum, monitor),
            None => ProcessingInfo::error(DESCRIPTION, NO_CORRECTION_AVAILABLE),
        }
    }
}

/// Exposes a `BaselineCorrectionSupport` as the "Baseline Correction"
/// processor category.
#[derive(Debug, Clone, Default)]
pub struct BaselineCorrectionTypeSupplier {
    support: BaselineCorrectionSupport,
}

impl BaselineCorrectionTypeSupplier {
    pub fn new(support: BaselineCorrectionSupport) -> Self {
        Self { support }
    }

    pub fn support(&self) -> &BaselineCorrectionSupport {
        &self.support
    }
}

impl ProcessTypeSupplier for BaselineCorrectionTypeSupplier {
    fn category(&self) -> &str {
        CATEGORY
    }

    fn processor_ids(&self) -> Vec<String> {
        self.support.available_correction_ids().unwrap_or_default()
    }

    fn processor_name(&self, processor_id: &str) -> Option<String> {
        self.support
            .supplier(processor_id)
            .ok()
            .map(|s| s.detector_name.clone())
    }

    fn apply(
        &self,
        spectrum: &mut MassSpectrum,
        processor_id: &str,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        self.support.set_baseline(spectrum, processor_id, monitor)
    }
}
