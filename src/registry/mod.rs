//! Processor registry: dispatch of process entries by category and id.
//!
//! This module provides:
//! - `ProcessTypeSupplier`: Trait implemented by every processor category
//! - `ProcessTypeSupport`: Ordered table of categories, read-only once built
//! - `baseline`: The baseline-correction category

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{MassSpectrum, ProcessEntry};
use crate::monitor::ProgressMonitor;
use crate::processing::ProcessingInfo;

pub mod baseline;

pub use baseline::{
    BaselineCorrection, BaselineCorrectionSupplier, BaselineCorrectionSupport,
    BaselineCorrectionTypeSupplier, NoBaselineCorrectionAvailable,
};

/// Returned for names and ids that cannot be resolved.
pub const NOT_AVAILABLE: &str = "n/a";

const DESCRIPTION: &str = "Process Type Support";

/// A category of processors, e.g. baseline correction.
pub trait ProcessTypeSupplier: Send + Sync {
    /// Category name, matched against `ProcessEntry::process_category`.
    fn category(&self) -> &str;

    /// Ids of all processors in this category, in registration order.
    fn processor_ids(&self) -> Vec<String>;

    /// Display name of a processor, `None` if the id is unknown.
    fn processor_name(&self, processor_id: &str) -> Option<String>;

    /// Apply a processor to a record.
    fn apply(
        &self,
        spectrum: &mut MassSpectrum,
        processor_id: &str,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo;

    fn has_processor(&self, processor_id: &str) -> bool {
        self.processor_name(processor_id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("There is no supplier for the process category '{0}'.")]
    UnknownCategory(String),

    #[error("There is no processor '{processor_id}' in the category '{category}'.")]
    UnknownProcessor {
        category: String,
        processor_id: String,
    },
}

/// A processor found in the registry, ready to be applied.
#[derive(Clone, Copy)]
pub struct ResolvedProcessor<'a> {
    supplier: &'a dyn ProcessTypeSupplier,
    processor_id: &'a str,
}

impl ResolvedProcessor<'_> {
    pub fn category(&self) -> &str {
        self.supplier.category()
    }

    pub fn processor_id(&self) -> &str {
        self.processor_id
    }

    pub fn apply(
        &self,
        spectrum: &mut MassSpectrum,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        self.supplier.apply(spectrum, self.processor_id, monitor)
    }
}

impl std::fmt::Debug for ResolvedProcessor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedProcessor")
            .field("category", &self.category())
            .field("processor_id", &self.processor_id)
            .finish()
    }
}

/// Ordered table of processor categories.
///
/// The first supplier whose category matches wins.
#[derive(Clone, Default)]
pub struct ProcessTypeSupport {
    suppliers: Vec<Arc<dyn ProcessTypeSupplier>>,
}

impl std::fmt::Debug for ProcessTypeSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessTypeSupport")
            .field("categories", &self.categories())
            .finish()
    }
}

impl ProcessTypeSupport {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            suppliers: Vec::new(),
        }
    }

    /// Register a category supplier.
    pub fn register(&mut self, supplier: Arc<dyn ProcessTypeSupplier>) {
        debug!(category = supplier.category(), "registered process type supplier");
        self.suppliers.push(supplier);
    }

    /// Register a category supplier (builder pattern).
    pub fn with_supplier(mut self, supplier: Arc<dyn ProcessTypeSupplier>) -> Self {
        self.register(supplier);
        self
    }

    fn supplier(&self, category: &str) -> Option<&dyn ProcessTypeSupplier> {
        self.suppliers
            .iter()
            .find(|s| s.category() == category)
            .map(|s| s.as_ref())
    }

    /// Resolve a processor by category and id.
    pub fn resolve<'a>(
        &'a self,
        category: &str,
        processor_id: &'a str,
    ) -> Result<ResolvedProcessor<'a>, ResolveError> {
        let supplier = self
            .supplier(category)
            .ok_or_else(|| ResolveError::UnknownCategory(category.to_string()))?;

        if !supplier.has_processor(processor_id) {
            return Err(ResolveError::UnknownProcessor {
                category: category.to_string(),
                processor_id: processor_id.to_string(),
            });
        }

        Ok(ResolvedProcessor {
            supplier,
            processor_id,
        })
    }

    /// All registered categories, in registration order.
    pub fn categories(&self) -> Vec<String> {
        self.suppliers
            .iter()
            .map(|s| s.category().to_string())
            .collect()
    }

    /// Processor ids of a category; `["n/a"]` if the category is unknown.
    pub fn processor_ids(&self, category: &str) -> Vec<String> {
        match self.supplier(category) {
            Some(supplier) => supplier.processor_ids(),
            None => vec![NOT_AVAILABLE.to_string()],
        }
    }

    /// Display name of a processor, `"n/a"` if it cannot be resolved.
    pub fn processor_name(&self, category: &str, processor_id: &str) -> String {
        self.supplier(category)
            .and_then(|s| s.processor_name(processor_id))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn processor_names(&self, category: &str, processor_ids: &[String]) -> Vec<String> {
        processor_ids
            .iter()
            .map(|id| self.processor_name(category, id))
            .collect()
    }

    /// Apply the processor named by `entry` to a record.
    ///
    /// Resolution failures become a single error message; the record is left
    /// untouched.
    pub fn apply_processor(
        &self,
        spectrum: &mut MassSpectrum,
        entry: &ProcessEntry,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        match self.resolve(entry.process_category(), entry.processor_id()) {
            Ok(processor) => processor.apply(spectrum, monitor),
            Err(e) => {
                warn!(
                    category = entry.process_category(),
                    processor_id = entry.processor_id(),
                    "{e}"
                );
                ProcessingInfo::error(DESCRIPTION, e.to_string())
            }
        }
    }
}

/// Create the default registry: the baseline-correction category with no
/// corrections installed.
pub fn default_process_support() -> ProcessTypeSupport {
    ProcessTypeSupport::new().with_supplier(Arc::new(BaselineCorrectionTypeSupplier::default()))
}
