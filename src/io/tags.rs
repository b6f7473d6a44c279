//! Element and attribute names of the batch job document.
//!
//! These must match existing job files exactly.

pub const UTF8: &str = "UTF-8";

pub const BATCH_PROCESS_JOB: &str = "BatchProcessJob";
pub const HEADER: &str = "Header";

pub const INPUT_ENTRIES: &str = "InputEntries";
pub const INPUT_ENTRY: &str = "InputEntry";

pub const PROCESS_ENTRIES: &str = "ProcessEntries";
pub const PROCESS_ENTRY: &str = "ProcessEntry";
pub const PROCESSOR_TYPE: &str = "processorType";
pub const PROCESSOR_ID: &str = "processorId";

pub const OUTPUT_ENTRIES: &str = "OutputEntries";
pub const OUTPUT_ENTRY: &str = "OutputEntry";
pub const CONVERTER_ID: &str = "converterId";

pub const REPORT_ENTRIES: &str = "ReportEntries";
pub const REPORT_ENTRY: &str = "ReportEntry";
pub const REPORT_SUPPLIER_ID: &str = "reportSupplierId";
