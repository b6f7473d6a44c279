//! Mass-spectrum converters: loading input files and writing output files.
//!
//! This module provides:
//! - `SpectrumConverter`: Trait for importers/exporters of one file format
//! - `ConverterRegistry`: Registry resolving converters by id or extension
//! - `JsonConverter`: Reference JSON converter (feature `json`)

use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ConvertError;
use crate::model::MassSpectra;
use crate::monitor::ProgressMonitor;
use crate::processing::ProcessingInfo;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::JsonConverter;

const DESCRIPTION: &str = "Mass Spectrum Converter";

/// Trait for mass-spectrum file converters.
pub trait SpectrumConverter: Send + Sync + Debug {
    /// Identifier referenced by `OutputEntry::converter_id`.
    fn id(&self) -> &str;

    /// File extensions this converter imports, without the dot.
    fn extensions(&self) -> &[&str];

    fn import(&self, path: &Path) -> Result<MassSpectra, ConvertError>;

    fn export(&self, path: &Path, spectra: &MassSpectra) -> Result<(), ConvertError>;

    fn matches_extension(&self, ext: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Registry of converters, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn SpectrumConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Register a converter. A converter with an already registered id
    /// replaces the previous one.
    pub fn register(&mut self, converter: Arc<dyn SpectrumConverter>) {
        if let Some(slot) = self
            .converters
            .iter_mut()
            .find(|c| c.id() == converter.id())
        {
            *slot = converter;
        } else {
            self.converters.push(converter);
        }
    }

    /// Register a converter (builder pattern).
    pub fn with_converter(mut self, converter: Arc<dyn SpectrumConverter>) -> Self {
        self.register(converter);
        self
    }

    pub fn converter(&self, id: &str) -> Option<&Arc<dyn SpectrumConverter>> {
        self.converters.iter().find(|c| c.id() == id)
    }

    pub fn converter_for_extension(&self, ext: &str) -> Option<&Arc<dyn SpectrumConverter>> {
        self.converters.iter().find(|c| c.matches_extension(ext))
    }

    pub fn ids(&self) -> Vec<String> {
        self.converters.iter().map(|c| c.id().to_string()).collect()
    }

    /// Load the mass spectra of an input file.
    ///
    /// The converter matching the file extension is tried first; otherwise
    /// every converter is tried in registration order.
    pub fn load(
        &self,
        path: &Path,
        monitor: &dyn ProgressMonitor,
    ) -> Result<MassSpectra, ConvertError> {
        if !path.is_file() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }
        monitor.begin_task("Import mass spectra", 1);

        let by_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(|ext| self.converter_for_extension(ext));

        let mut spectra = match by_extension {
            Some(converter) => converter.import(path)?,
            None => self.import_any(path)?,
        };
        if spectra.name.is_empty() {
            spectra.name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        monitor.worked(1);
        debug!(path = %path.display(), records = spectra.len(), "loaded mass spectra");
        Ok(spectra)
    }

    fn import_any(&self, path: &Path) -> Result<MassSpectra, ConvertError> {
        for converter in &self.converters {
            match converter.import(path) {
                Ok(spectra) => return Ok(spectra),
                Err(e) => debug!(converter = converter.id(), "import attempt failed: {e}"),
            }
        }
        Err(ConvertError::NoConverter(path.to_path_buf()))
    }

    /// Write mass spectra with the converter `converter_id`.
    ///
    /// Failures are returned as error messages; success adds none.
    pub fn write(
        &self,
        path: &Path,
        spectra: &MassSpectra,
        converter_id: &str,
        monitor: &dyn ProgressMonitor,
    ) -> ProcessingInfo {
        let Some(converter) = self.converter(converter_id) else {
            let e = ConvertError::UnknownConverter(converter_id.to_string());
            warn!(path = %path.display(), "{e}");
            return ProcessingInfo::error(DESCRIPTION, e.to_string());
        };

        monitor.begin_task("Export mass spectra", 1);
        let result = converter.export(path, spectra);
        monitor.worked(1);

        match result {
            Ok(()) => {
                debug!(path = %path.display(), converter = converter_id, "wrote mass spectra");
                ProcessingInfo::new()
            }
            Err(e) => {
                warn!(path = %path.display(), converter = converter_id, "export failed: {e}");
                ProcessingInfo::error(
                    DESCRIPTION,
                    format!("The mass spectra could not be written to {}: {e}", path.display()),
                )
            }
        }
    }
}

/// Create a registry with all converters enabled by features.
pub fn default_converters() -> ConverterRegistry {
    #[allow(unused_mut)]
    let mut registry = ConverterRegistry::new();

    #[cfg(feature = "json")]
    registry.register(Arc::new(JsonConverter::new()));

    registry
}
