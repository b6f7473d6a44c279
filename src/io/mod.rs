//! Persisted batch job format.
//!
//! This module provides:
//! - `BatchJobReader`: Parses a `BatchProcessJob` XML document into a `BatchJob`
//! - `BatchJobWriter`: Serializes a `BatchJob` to the same format
//! - `tags`: Element and attribute names
//!
//! Layout of a job document:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <BatchProcessJob>
//!   <Header/>
//!   <InputEntries>
//!     <InputEntry>/data/sample.json</InputEntry>
//!   </InputEntries>
//!   <ProcessEntries>
//!     <ProcessEntry processorType="Baseline Correction" processorId="smooth"/>
//!   </ProcessEntries>
//!   <OutputEntries>
//!     <OutputEntry converterId="json">/data/out</OutputEntry>
//!   </OutputEntries>
//!   <ReportEntries>
//!     <ReportEntry reportSupplierId="summary">/data/reports</ReportEntry>
//!   </ReportEntries>
//! </BatchProcessJob>
//! ```

mod reader;
mod writer;

pub mod tags;

pub use reader::BatchJobReader;
pub use writer::BatchJobWriter;
