//! In-memory representation of a batch job.
//!
//! This module provides:
//! - `BatchJob`: Ordered input, process, output and report entries
//! - `InputEntry`, `ProcessEntry`, `OutputEntry`, `ReportEntry`: The entry kinds
//! - `MassSpectra`, `MassSpectrum`, `Ion`: The records a job operates on

use std::path::Path;

mod spectrum;

pub use spectrum::{Ion, MassSpectra, MassSpectrum};

/// A batch job: four ordered entry lists.
///
/// Insertion order is the processing order and is preserved by the reader and
/// the writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchJob {
    input_entries: Vec<InputEntry>,
    process_entries: Vec<ProcessEntry>,
    output_entries: Vec<OutputEntry>,
    report_entries: Vec<ReportEntry>,
}

impl BatchJob {
    /// Create an empty job.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_entries(&self) -> &[InputEntry] {
        &self.input_entries
    }

    pub fn process_entries(&self) -> &[ProcessEntry] {
        &self.process_entries
    }

    pub fn output_entries(&self) -> &[OutputEntry] {
        &self.output_entries
    }

    pub fn report_entries(&self) -> &[ReportEntry] {
        &self.report_entries
    }

    pub fn add_input_entry(&mut self, entry: InputEntry) {
        self.input_entries.push(entry);
    }

    pub fn add_process_entry(&mut self, entry: ProcessEntry) {
        self.process_entries.push(entry);
    }

    pub fn add_output_entry(&mut self, entry: OutputEntry) {
        self.output_entries.push(entry);
    }

    pub fn add_report_entry(&mut self, entry: ReportEntry) {
        self.report_entries.push(entry);
    }

    /// Add an input entry (builder pattern).
    pub fn with_input(mut self, entry: InputEntry) -> Self {
        self.add_input_entry(entry);
        self
    }

    /// Add a process entry (builder pattern).
    pub fn with_process(mut self, entry: ProcessEntry) -> Self {
        self.add_process_entry(entry);
        self
    }

    /// Add an output entry (builder pattern).
    pub fn with_output(mut self, entry: OutputEntry) -> Self {
        self.add_output_entry(entry);
        self
    }

    /// Add a report entry (builder pattern).
    pub fn with_report(mut self, entry: ReportEntry) -> Self {
        self.add_report_entry(entry);
        self
    }

    /// True when all four lists are empty.
    pub fn is_empty(&self) -> bool {
        self.input_entries.is_empty()
            && self.process_entries.is_empty()
            && self.output_entries.is_empty()
            && self.report_entries.is_empty()
    }
}

/// A mass-spectrum file to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEntry {
    input_file: String,
}

impl InputEntry {
    pub fn new(input_file: impl Into<String>) -> Self {
        Self {
            input_file: input_file.into(),
        }
    }

    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    /// Last segment of the input path, or an empty string if there is none.
    pub fn name(&self) -> &str {
        Path::new(&self.input_file)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

/// A processor to apply to every loaded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    process_category: String,
    processor_id: String,
}

impl ProcessEntry {
    pub fn new(process_category: impl Into<String>, processor_id: impl Into<String>) -> Self {
        Self {
            process_category: process_category.into(),
            processor_id: processor_id.into(),
        }
    }

    pub fn process_category(&self) -> &str {
        &self.process_category
    }

    pub fn processor_id(&self) -> &str {
        &self.processor_id
    }
}

/// A folder and converter to write processed records with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    output_folder: String,
    converter_id: String,
}

impl OutputEntry {
    pub fn new(output_folder: impl Into<String>, converter_id: impl Into<String>) -> Self {
        Self {
            output_folder: output_folder.into(),
            converter_id: converter_id.into(),
        }
    }

    /// The folder exactly as configured (not normalized).
    pub fn output_folder(&self) -> &str {
        &self.output_folder
    }

    pub fn converter_id(&self) -> &str {
        &self.converter_id
    }
}

/// A report destination and the supplier generating it.
///
/// The destination is a folder if it exists as a directory at execution time,
/// otherwise a file that reports are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    report_folder_or_file: String,
    report_supplier_id: String,
}

impl ReportEntry {
    pub fn new(
        report_folder_or_file: impl Into<String>,
        report_supplier_id: impl Into<String>,
    ) -> Self {
        Self {
            report_folder_or_file: report_folder_or_file.into(),
            report_supplier_id: report_supplier_id.into(),
        }
    }

    pub fn report_folder_or_file(&self) -> &str {
        &self.report_folder_or_file
    }

    pub fn report_supplier_id(&self) -> &str {
        &self.report_supplier_id
    }
}
