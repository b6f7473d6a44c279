//! Batch job reader.

use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::escape::unescape;
use tracing::debug;

use super::tags;
use crate::error::{ReadError, ReadErrorKind};
use crate::model::{BatchJob, InputEntry, OutputEntry, ProcessEntry, ReportEntry};
use crate::monitor::ProgressMonitor;

type BoxError = Box<dyn Error + Send + Sync>;

/// Reads `BatchProcessJob` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchJobReader;

impl BatchJobReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a job file.
    ///
    /// Missing, unreadable and empty files are reported before any parsing
    /// takes place.
    pub fn read(
        &self,
        path: impl AsRef<Path>,
        monitor: &dyn ProgressMonitor,
    ) -> Result<BatchJob, ReadError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| {
            let kind = if e.kind() == io::ErrorKind::NotFound {
                ReadErrorKind::NotFound
            } else {
                ReadErrorKind::NotReadable
            };
            ReadError::new(kind, path).with_source(e)
        })?;

        if !metadata.is_file() {
            return Err(ReadError::new(ReadErrorKind::NotReadable, path));
        }
        if metadata.len() == 0 {
            return Err(ReadError::new(ReadErrorKind::Empty, path));
        }

        let file = File::open(path)
            .map_err(|e| ReadError::new(ReadErrorKind::NotReadable, path).with_source(e))?;

        monitor.begin_task("Read batch job", 1);
        let job = parse(BufReader::new(file))
            .map_err(|e| ReadError::new(ReadErrorKind::Malformed, path).with_source(e))?;
        monitor.worked(1);

        debug!(
            path = %path.display(),
            inputs = job.input_entries().len(),
            processes = job.process_entries().len(),
            outputs = job.output_entries().len(),
            reports = job.report_entries().len(),
            "read batch job"
        );
        Ok(job)
    }

    /// Read a job document from an in-memory or streamed source.
    pub fn read_from<R: BufRead>(&self, mut source: R) -> Result<BatchJob, ReadError> {
        let is_empty = source
            .fill_buf()
            .map_err(|e| ReadError::new(ReadErrorKind::NotReadable, "-").with_source(e))?
            .is_empty();
        if is_empty {
            return Err(ReadError::new(ReadErrorKind::Empty, "-"));
        }

        parse(source).map_err(|e| ReadError::new(ReadErrorKind::Malformed, "-").with_source(e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Input,
    Process,
    Output,
    Report,
}

impl EntryKind {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            n if n == tags::INPUT_ENTRY.as_bytes() => Some(EntryKind::Input),
            n if n == tags::PROCESS_ENTRY.as_bytes() => Some(EntryKind::Process),
            n if n == tags::OUTPUT_ENTRY.as_bytes() => Some(EntryKind::Output),
            n if n == tags::REPORT_ENTRY.as_bytes() => Some(EntryKind::Report),
            _ => None,
        }
    }
}

/// Attribute values seen so far. An entry without an attribute inherits the
/// value of the previous entry of the same kind.
#[derive(Debug, Default)]
struct Attributes {
    processor_type: String,
    processor_id: String,
    converter_id: String,
    report_supplier_id: String,
}

impl Attributes {
    fn update(&mut self, kind: EntryKind, start: &BytesStart<'_>) -> Result<(), BoxError> {
        for attr in start.attributes() {
            let attr = attr?;
            let key = attr.key.local_name();
            let slot = match kind {
                EntryKind::Process if key.as_ref() == tags::PROCESSOR_TYPE.as_bytes() => {
                    &mut self.processor_type
                }
                EntryKind::Process if key.as_ref() == tags::PROCESSOR_ID.as_bytes() => {
                    &mut self.processor_id
                }
                EntryKind::Output if key.as_ref() == tags::CONVERTER_ID.as_bytes() => {
                    &mut self.converter_id
                }
                EntryKind::Report if key.as_ref() == tags::REPORT_SUPPLIER_ID.as_bytes() => {
                    &mut self.report_supplier_id
                }
                _ => continue,
            };
            *slot = attr.unescape_value()?.into_owned();
        }
        Ok(())
    }
}

/// An entry whose text content is being collected.
#[derive(Debug)]
struct OpenEntry {
    kind: EntryKind,
    depth: usize,
    text: String,
}

fn finish_entry(job: &mut BatchJob, kind: EntryKind, text: String, attrs: &Attributes) {
    match kind {
        EntryKind::Input => job.add_input_entry(InputEntry::new(text)),
        EntryKind::Process => job.add_process_entry(ProcessEntry::new(
            attrs.processor_type.clone(),
            attrs.processor_id.clone(),
        )),
        EntryKind::Output => {
            job.add_output_entry(OutputEntry::new(text, attrs.converter_id.clone()))
        }
        EntryKind::Report => {
            job.add_report_entry(ReportEntry::new(text, attrs.report_supplier_id.clone()))
        }
    }
}

/// Single pass over the document. Entries of each kind end up in document
/// order; the header and unknown elements are skipped.
fn parse<R: BufRead>(source: R) -> Result<BatchJob, BoxError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut job = BatchJob::new();
    let mut attrs = Attributes::default();
    let mut open: Option<OpenEntry> = None;
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                if depth == 0 {
                    if seen_root {
                        return Err("document has more than one root element".into());
                    }
                    seen_root = true;
                }
                depth += 1;
                if open.is_none() {
                    if let Some(kind) = EntryKind::from_tag(start.local_name().as_ref()) {
                        attrs.update(kind, &start)?;
                        open = Some(OpenEntry {
                            kind,
                            depth,
                            text: String::new(),
                        });
                    }
                }
            }
            Event::Empty(start) => {
                if depth == 0 {
                    if seen_root {
                        return Err("document has more than one root element".into());
                    }
                    seen_root = true;
                }
                if open.is_none() {
                    if let Some(kind) = EntryKind::from_tag(start.local_name().as_ref()) {
                        attrs.update(kind, &start)?;
                        finish_entry(&mut job, kind, String::new(), &attrs);
                    }
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err("unexpected end tag".into());
                }
                if open.as_ref().is_some_and(|entry| entry.depth == depth) {
                    if let Some(entry) = open.take() {
                        finish_entry(&mut job, entry.kind, entry.text, &attrs);
                    }
                }
                depth -= 1;
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text)?;
                if let Some(entry) = open.as_mut() {
                    entry.text.push_str(&unescape(raw)?);
                } else if depth == 0 && !raw.trim().is_empty() {
                    return Err("text outside of the root element".into());
                }
            }
            Event::CData(data) => {
                if let Some(entry) = open.as_mut() {
                    entry.text.push_str(std::str::from_utf8(&data)?);
                }
            }
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference)?;
                if let Some(entry) = open.as_mut() {
                    entry.text.push_str(&unescape(&format!("&{name};"))?);
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err("document has no root element".into());
    }
    if depth != 0 {
        return Err(format!("{depth} element(s) not closed at end of document").into());
    }
    Ok(job)
}
