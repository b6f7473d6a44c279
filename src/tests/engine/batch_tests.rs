//! Execution tests for BatchProcess.

use std::path::{MAIN_SEPARATOR, PathBuf};

use crate::engine::{BatchProcess, normalize_folder, output_destination, report_destination};
use crate::model::{BatchJob, Ion, InputEntry, OutputEntry, ProcessEntry, ReportEntry};
use crate::monitor::{CancellationToken, NullProgressMonitor, ProgressMonitor};
use crate::processing::MessageType;
use crate::registry::baseline::CATEGORY;
use crate::tests::support::{
    FakeConverter, Fixture, RecordingReport, fixture, processors, write_input,
};

fn engine(fx: &Fixture) -> BatchProcess {
    BatchProcess::new(processors(), fx.converters.clone(), fx.reports.clone())
}

fn successes(result: &crate::ProcessingInfo) -> Vec<String> {
    result
        .of_type(MessageType::Info)
        .filter(|m| m.message.starts_with("The file has been processed successfully"))
        .map(|m| m.message.clone())
        .collect()
}

#[test]
fn empty_job_yields_no_messages() {
    let fx = fixture();
    let result = engine(&fx).run(&BatchJob::new(), &NullProgressMonitor);
    assert!(result.is_empty());
}

#[test]
fn absent_job_is_a_single_error() {
    let fx = fixture();
    let result = engine(&fx).execute(None, &NullProgressMonitor);

    assert_eq!(result.len(), 1);
    assert_eq!(result.messages()[0].message_type, MessageType::Error);
    assert_eq!(result.messages()[0].message, "The batch job was null.");
    assert!(fx.converter.exported().is_empty());
}

#[test]
fn failing_input_does_not_skip_the_next_one() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.ms").to_string_lossy().into_owned();
    let present = write_input(dir.path(), "present.ms", "2\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(missing.clone()))
        .with_input(InputEntry::new(present.clone()))
        .with_output(OutputEntry::new(dir.path().to_string_lossy(), FakeConverter::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains(&missing));

    let ok = successes(&result);
    assert_eq!(ok.len(), 1);
    assert!(ok[0].contains(&present));

    // Only the second input reached the output phase.
    let exported = fx.converter.exported();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].1.name, "present.ms");
}

#[test]
fn undecodable_input_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_input(dir.path(), "broken.ms", "not-a-number\n");
    let good = write_input(dir.path(), "good.ms", "1\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(broken))
        .with_input(InputEntry::new(good));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    assert_eq!(result.errors().count(), 1);
    assert_eq!(successes(&result).len(), 1);
}

#[test]
fn unknown_category_yields_one_error_per_record_and_leaves_records_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "a.ms", "1\n3\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input.clone()))
        .with_process(ProcessEntry::new("Peak Detector", "whatever"))
        .with_output(OutputEntry::new(dir.path().to_string_lossy(), FakeConverter::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    assert_eq!(result.errors().count(), 2);
    assert!(
        result
            .errors()
            .all(|m| m.message.contains("Peak Detector"))
    );

    let original = fx.converter_import(&input);
    let exported = fx.converter.exported();
    assert_eq!(exported[0].1, original);
}

#[test]
fn unknown_processor_id_in_known_category_yields_one_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "a.ms", "4\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input))
        .with_process(ProcessEntry::new(CATEGORY, "no-such-correction"))
        .with_process(ProcessEntry::new(CATEGORY, ""));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    // One per process entry occurrence.
    assert_eq!(result.errors().count(), 2);
    assert_eq!(successes(&result).len(), 1);
}

#[test]
fn process_entries_run_in_file_order_on_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "ordered.ms", "0\n0\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input))
        .with_process(ProcessEntry::new(CATEGORY, "high"))
        .with_process(ProcessEntry::new(CATEGORY, "low"))
        .with_process(ProcessEntry::new(CATEGORY, "high"))
        .with_output(OutputEntry::new(dir.path().to_string_lossy(), FakeConverter::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);
    assert!(!result.has_error_message());

    let exported = fx.converter.exported();
    let expected = vec![Ion::new(2.0, 1.0), Ion::new(1.0, 1.0), Ion::new(2.0, 1.0)];
    for spectrum in exported[0].1.spectra.iter().flatten() {
        assert_eq!(spectrum.ions, expected);
    }
}

#[test]
fn absent_record_is_reported_and_the_rest_processed() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "holes.ms", "0\nnone\n0\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input))
        .with_process(ProcessEntry::new(CATEGORY, "low"))
        .with_output(OutputEntry::new(dir.path().to_string_lossy(), FakeConverter::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "The mass spectrum must not be null.");

    let exported = fx.converter.exported();
    let spectra = &exported[0].1.spectra;
    assert_eq!(spectra[0].as_ref().unwrap().ions.len(), 1);
    assert!(spectra[1].is_none());
    assert_eq!(spectra[2].as_ref().unwrap().ions.len(), 1);
}

#[test]
fn output_folder_with_and_without_separator_is_equivalent() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.ms", "1\n");
    let bare = dir.path().join("out").to_string_lossy().into_owned();
    let slashed = format!("{bare}{MAIN_SEPARATOR}");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input))
        .with_output(OutputEntry::new(bare.clone(), FakeConverter::ID))
        .with_output(OutputEntry::new(slashed, FakeConverter::ID));

    let fx = fixture();
    engine(&fx).run(&job, &NullProgressMonitor);

    let exported = fx.converter.exported();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0].0, exported[1].0);
    assert_eq!(exported[0].0, PathBuf::from(bare).join("sample.ms"));
}

#[test]
fn unknown_converter_is_an_error_but_reports_still_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.ms", "1\n");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input))
        .with_output(OutputEntry::new(dir.path().to_string_lossy(), "mzXML"))
        .with_report(ReportEntry::new(dir.path().to_string_lossy(), RecordingReport::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    assert_eq!(result.errors().count(), 1);
    assert!(result.errors().all(|m| m.message.contains("mzXML")));
    assert_eq!(fx.report.calls().len(), 1);
    assert_eq!(successes(&result).len(), 1);
}

#[test]
fn report_to_directory_is_fresh_and_to_file_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_input(dir.path(), "first.ms", "1\n");
    let second = write_input(dir.path(), "second.ms", "1\n");
    let report_dir = dir.path().join("reports");
    std::fs::create_dir(&report_dir).unwrap();
    let report_file = dir.path().join("all.txt");

    let job = BatchJob::new()
        .with_input(InputEntry::new(first))
        .with_input(InputEntry::new(second))
        .with_report(ReportEntry::new(report_dir.to_string_lossy(), RecordingReport::ID))
        .with_report(ReportEntry::new(report_file.to_string_lossy(), RecordingReport::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);
    assert!(!result.has_error_message());

    let calls = fx.report.calls();
    assert_eq!(calls.len(), 4);

    assert_eq!(calls[0].path, report_dir.join("first.ms"));
    assert!(!calls[0].append);
    assert_eq!(calls[1].path, report_file);
    assert!(calls[1].append);
    assert_eq!(calls[2].path, report_dir.join("second.ms"));
    assert!(!calls[2].append);
    assert_eq!(calls[3].path, report_file);
    assert!(calls[3].append);
}

#[test]
fn canceled_monitor_stops_before_the_next_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.ms", "1\n");
    let job = BatchJob::new().with_input(InputEntry::new(input));

    let token = CancellationToken::new();
    token.cancel();

    let fx = fixture();
    let result = engine(&fx).run(&job, &token);

    assert_eq!(result.len(), 1);
    assert_eq!(result.messages()[0].message_type, MessageType::Warn);
    assert!(successes(&result).is_empty());
}

/// Cancels as soon as any unit of work is reported.
#[derive(Debug, Default)]
struct CancelAfterWork {
    token: CancellationToken,
}

impl ProgressMonitor for CancelAfterWork {
    fn worked(&self, _work: usize) {
        self.token.cancel();
    }

    fn is_canceled(&self) -> bool {
        self.token.is_canceled()
    }
}

#[test]
fn cancel_during_an_input_lets_it_finish_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_input(dir.path(), "first.ms", "1\n");
    let second = write_input(dir.path(), "second.ms", "1\n");
    let job = BatchJob::new()
        .with_input(InputEntry::new(first.clone()))
        .with_input(InputEntry::new(second))
        .with_output(OutputEntry::new(dir.path().to_string_lossy(), FakeConverter::ID));

    let fx = fixture();
    let result = engine(&fx).run(&job, &CancelAfterWork::default());

    let ok = successes(&result);
    assert_eq!(ok.len(), 1);
    assert!(ok[0].ends_with(&first));

    let exported = fx.converter.exported();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].1.name, "first.ms");

    let last = result.messages().last().unwrap();
    assert_eq!(last.message_type, MessageType::Warn);
    assert!(!result.has_error_message());
}

#[test]
fn one_success_message_per_processed_input() {
    let dir = tempfile::tempdir().unwrap();
    let job = (0..3).fold(BatchJob::new(), |job, i| {
        let path = write_input(dir.path(), &format!("s{i}.ms"), "1\n");
        job.with_input(InputEntry::new(path))
    });

    let fx = fixture();
    let result = engine(&fx).run(&job, &NullProgressMonitor);

    let ok = successes(&result);
    assert_eq!(ok.len(), 3);
    for (i, message) in ok.iter().enumerate() {
        assert!(message.ends_with(&format!("s{i}.ms")));
    }
}

#[test]
fn folder_helpers() {
    let sep = MAIN_SEPARATOR;
    assert_eq!(normalize_folder("out"), format!("out{sep}"));
    assert_eq!(normalize_folder(&format!("out{sep}")), format!("out{sep}"));
    assert_eq!(
        output_destination("out", "a.ms"),
        output_destination(&format!("out{sep}"), "a.ms")
    );

    let (path, append) = report_destination("definitely/not/a/dir/report.txt", "a.ms");
    assert_eq!(path, PathBuf::from("definitely/not/a/dir/report.txt"));
    assert!(append);
}

impl Fixture {
    /// What the fake converter imports for `path`, named like the engine names it.
    fn converter_import(&self, path: &str) -> crate::model::MassSpectra {
        use crate::convert::SpectrumConverter;

        let path = std::path::Path::new(path);
        let mut spectra = self.converter.import(path).unwrap();
        spectra.name = path.file_name().unwrap().to_string_lossy().into_owned();
        spectra
    }
}
