//! Mass-spectrum records.

use serde::{Deserialize, Serialize};

/// A single ion: mass-to-charge ratio and abundance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ion {
    pub mz: f64,
    pub abundance: f32,
}

impl Ion {
    pub fn new(mz: f64, abundance: f32) -> Self {
        Self { mz, abundance }
    }
}

/// One scan of measurement data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassSpectrum {
    /// Retention time in milliseconds
    #[serde(default)]
    pub retention_time: i32,
    #[serde(default)]
    pub ions: Vec<Ion>,
}

impl MassSpectrum {
    pub fn new(retention_time: i32, ions: Vec<Ion>) -> Self {
        Self {
            retention_time,
            ions,
        }
    }

    pub fn total_signal(&self) -> f32 {
        self.ions.iter().map(|ion| ion.abundance).sum()
    }
}

/// A named collection of records loaded from one input file.
///
/// The name is used to derive output and report file names. A `None` record
/// stands for an entry the converter could not materialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassSpectra {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spectra: Vec<Option<MassSpectrum>>,
}

impl MassSpectra {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spectra: Vec::new(),
        }
    }

    /// Append a record (builder pattern).
    pub fn with_spectrum(mut self, spectrum: MassSpectrum) -> Self {
        self.spectra.push(Some(spectrum));
        self
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    /// Number of records that are present.
    pub fn valid_count(&self) -> usize {
        self.spectra.iter().filter(|s| s.is_some()).count()
    }

    pub fn ion_count(&self) -> usize {
        self.spectra.iter().flatten().map(|s| s.ions.len()).sum()
    }
}
