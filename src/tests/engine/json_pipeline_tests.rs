//! End-to-end runs of the default engine on JSON files.

use std::fs;

use crate::convert::{JsonConverter, SpectrumConverter};
use crate::engine::BatchProcess;
use crate::model::{BatchJob, InputEntry, Ion, MassSpectra, MassSpectrum, OutputEntry, ReportEntry};
use crate::monitor::NullProgressMonitor;
use crate::report::SummaryReport;

fn sample(name: &str) -> MassSpectra {
    MassSpectra::new(name)
        .with_spectrum(MassSpectrum::new(1200, vec![Ion::new(43.0, 10.0), Ion::new(57.0, 5.5)]))
        .with_spectrum(MassSpectrum::new(1800, vec![Ion::new(91.0, 99.0)]))
}

#[test]
fn default_engine_converts_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input_a = dir.path().join("a.json");
    let input_b = dir.path().join("b.json");
    JsonConverter.export(&input_a, &sample("a.json")).unwrap();
    JsonConverter.export(&input_b, &sample("b.json")).unwrap();

    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    let summary = dir.path().join("summary.tsv");

    let job = BatchJob::new()
        .with_input(InputEntry::new(input_a.to_string_lossy()))
        .with_input(InputEntry::new(input_b.to_string_lossy()))
        .with_output(OutputEntry::new(out_dir.to_string_lossy(), JsonConverter::ID))
        .with_report(ReportEntry::new(summary.to_string_lossy(), SummaryReport::ID));

    let result = BatchProcess::default().run(&job, &NullProgressMonitor);
    assert!(!result.has_error_message(), "{result}");

    let written = JsonConverter.import(&out_dir.join("a.json")).unwrap();
    assert_eq!(written, sample("a.json"));
    assert!(out_dir.join("b.json").is_file());

    let report = fs::read_to_string(&summary).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines, vec!["a.json\t2\t2\t3", "b.json\t2\t2\t3"]);
}

#[test]
fn report_folder_gets_one_fresh_file_per_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("c.json");
    JsonConverter.export(&input, &sample("c.json")).unwrap();

    let report_dir = dir.path().join("reports");
    fs::create_dir(&report_dir).unwrap();
    fs::write(report_dir.join("c.json"), "stale\nstale\n").unwrap();

    let job = BatchJob::new()
        .with_input(InputEntry::new(input.to_string_lossy()))
        .with_report(ReportEntry::new(report_dir.to_string_lossy(), SummaryReport::ID));

    let result = BatchProcess::default().run(&job, &NullProgressMonitor);
    assert!(!result.has_error_message(), "{result}");

    let report = fs::read_to_string(report_dir.join("c.json")).unwrap();
    assert_eq!(report, "c.json\t2\t2\t3\n");
}

#[test]
fn default_engine_rejects_unsupported_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.raw");
    fs::write(&input, [0u8, 1, 2, 3]).unwrap();

    let job = BatchJob::new().with_input(InputEntry::new(input.to_string_lossy()));
    let result = BatchProcess::default().run(&job, &NullProgressMonitor);

    assert_eq!(result.errors().count(), 1);
    assert_eq!(result.len(), 1);
}
