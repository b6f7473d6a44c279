//! JSON converter implementation.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::SpectrumConverter;
use crate::error::ConvertError;
use crate::model::MassSpectra;

/// JSON converter using serde_json.
///
/// The document is a serialized `MassSpectra`; absent records are `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl JsonConverter {
    pub const ID: &'static str = "json";

    pub fn new() -> Self {
        Self
    }
}

impl SpectrumConverter for JsonConverter {
    fn id(&self) -> &str {
        Self::ID
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn import(&self, path: &Path) -> Result<MassSpectra, ConvertError> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ConvertError::Format(Box::new(e)))
    }

    fn export(&self, path: &Path, spectra: &MassSpectra) -> Result<(), ConvertError> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, spectra)
            .map_err(|e| ConvertError::Format(Box::new(e)))?;
        out.flush()?;
        Ok(())
    }
}
