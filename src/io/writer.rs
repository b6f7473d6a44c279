//! Batch job writer.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use tracing::debug;

use super::tags;
use crate::error::WriteError;
use crate::model::{BatchJob, InputEntry, OutputEntry, ProcessEntry, ReportEntry};
use crate::monitor::ProgressMonitor;

const INPUT_COMMENT: &str = " Load the following mass spectra. ";
const PROCESS_COMMENT: &str = " Process each mass spectrum with the listed methods. ";
const OUTPUT_COMMENT: &str = " Write each processed mass spectrum to the given output formats. ";
const REPORT_COMMENT: &str = " Process each mass spectrum with the listed report suppliers. ";

/// Writes `BatchProcessJob` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchJobWriter;

impl BatchJobWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write a job file, replacing any existing content.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        job: &BatchJob,
        monitor: &dyn ProgressMonitor,
    ) -> Result<(), WriteError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WriteError::NotWritable {
            path: path.to_path_buf(),
            source,
        })?;

        monitor.begin_task("Write batch job", 1);
        let mut out = BufWriter::new(file);
        self.write_to(&mut out, job)?;
        out.flush()?;
        monitor.worked(1);

        debug!(path = %path.display(), "wrote batch job");
        Ok(())
    }

    /// Write a job document to any sink.
    pub fn write_to<W: Write>(&self, sink: W, job: &BatchJob) -> Result<(), WriteError> {
        let mut writer = Writer::new_with_indent(sink, b' ', 2);

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some(tags::UTF8), None)),
        )?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new(tags::BATCH_PROCESS_JOB)),
        )?;
        emit(&mut writer, Event::Empty(BytesStart::new(tags::HEADER)))?;

        emit(&mut writer, Event::Comment(BytesText::new(INPUT_COMMENT)))?;
        write_block(&mut writer, tags::INPUT_ENTRIES, job.input_entries(), input_entry)?;

        emit(&mut writer, Event::Comment(BytesText::new(PROCESS_COMMENT)))?;
        write_block(
            &mut writer,
            tags::PROCESS_ENTRIES,
            job.process_entries(),
            process_entry,
        )?;

        emit(&mut writer, Event::Comment(BytesText::new(OUTPUT_COMMENT)))?;
        write_block(
            &mut writer,
            tags::OUTPUT_ENTRIES,
            job.output_entries(),
            output_entry,
        )?;

        emit(&mut writer, Event::Comment(BytesText::new(REPORT_COMMENT)))?;
        write_block(
            &mut writer,
            tags::REPORT_ENTRIES,
            job.report_entries(),
            report_entry,
        )?;

        emit(&mut writer, Event::End(BytesEnd::new(tags::BATCH_PROCESS_JOB)))?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), WriteError> {
    writer
        .write_event(event)
        .map_err(|e| WriteError::Encode(Box::new(e)))
}

fn write_block<W, T, F>(
    writer: &mut Writer<W>,
    tag: &str,
    entries: &[T],
    write_entry: F,
) -> Result<(), WriteError>
where
    W: Write,
    F: Fn(&mut Writer<W>, &T) -> Result<(), WriteError>,
{
    emit(writer, Event::Start(BytesStart::new(tag)))?;
    for entry in entries {
        write_entry(writer, entry)?;
    }
    emit(writer, Event::End(BytesEnd::new(tag)))
}

/// Start tag, escaped text content, end tag. No whitespace is added between
/// them, so the content reads back unchanged.
fn text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    content: &str,
) -> Result<(), WriteError> {
    let end = start.to_end().into_owned();
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Text(BytesText::new(content)))?;
    emit(writer, Event::End(end))
}

fn input_entry<W: Write>(writer: &mut Writer<W>, entry: &InputEntry) -> Result<(), WriteError> {
    text_element(
        writer,
        BytesStart::new(tags::INPUT_ENTRY),
        entry.input_file(),
    )
}

fn process_entry<W: Write>(
    writer: &mut Writer<W>,
    entry: &ProcessEntry,
) -> Result<(), WriteError> {
    let start = BytesStart::new(tags::PROCESS_ENTRY).with_attributes([
        attribute(tags::PROCESSOR_TYPE, entry.process_category()),
        attribute(tags::PROCESSOR_ID, entry.processor_id()),
    ]);
    emit(writer, Event::Empty(start))
}

fn output_entry<W: Write>(writer: &mut Writer<W>, entry: &OutputEntry) -> Result<(), WriteError> {
    let start = BytesStart::new(tags::OUTPUT_ENTRY)
        .with_attributes([attribute(tags::CONVERTER_ID, entry.converter_id())]);
    text_element(writer, start, entry.output_folder())
}

fn report_entry<W: Write>(writer: &mut Writer<W>, entry: &ReportEntry) -> Result<(), WriteError> {
    let start = BytesStart::new(tags::REPORT_ENTRY)
        .with_attributes([attribute(tags::REPORT_SUPPLIER_ID, entry.report_supplier_id())]);
    text_element(writer, start, entry.report_folder_or_file())
}

/// Attribute with an escaped value. Tab, line feed and carriage return become
/// character references; written raw they read back as spaces.
fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let escaped = escape(value)
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;");
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}
