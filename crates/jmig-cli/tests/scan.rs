//! Batch scans over small CSV exports.

use std::fs;

use indicatif::ProgressBar;
use jmig_cli::config::Config;
use jmig_cli::scan::{ColumnKind, ScanOptions, ScanReport, Scanner};
use jmig_fields::{CorrectionTable, Escalation, NoEscalation, default_table};
use jmig_model::{OnUnresolved, SchemaRegistry};
use jmig_temporal::FormatSpec;
use tempfile::TempDir;

const EXPORT: &str = "\
Issue key,Created,Comment,Attachment,Log Work,Summary
JM-1,06/08/2020 18:34,2021-05-01;jdoe;Said: hi; bye,2021-05-01;jdoe;report.txt;http://server/path/report.txt,Fixed it;2021-05-01;jdoe;3600,First
JM-2,2021-06-04,,2021-05-01;report.txt;http://server/path/report.txt,bad;data,Second
";

fn options(on_unresolved: OnUnresolved) -> ScanOptions {
    ScanOptions {
        date_columns: vec!["created".to_string()],
        on_unresolved,
        ..ScanOptions::default()
    }
}

fn run(
    input: &str,
    options: ScanOptions,
    escalation: &dyn Escalation,
) -> anyhow::Result<(String, ScanReport)> {
    let registry = SchemaRegistry::builtin();
    let scanner = Scanner::new(&registry, default_table(), escalation, options)?;
    let mut output = Vec::new();
    let report = scanner.scan(input.as_bytes(), &mut output, &ProgressBar::hidden())?;
    Ok((String::from_utf8(output)?, report))
}

#[test]
fn cleans_compound_and_date_columns() {
    let (output, report) = run(EXPORT, options(OnUnresolved::Skip), &NoEscalation).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Issue key,Created,Comment,Attachment,Log Work,Summary");
    assert_eq!(
        lines[1],
        "JM-1,08/06/2020_18:34,01/05/2021_00:00;jdoe;Said: hi%3b bye,\
         01/05/2021_00:00;jdoe;report.txt;http://server/path/report.txt,\
         Fixed it;01/05/2021_00:00;jdoe;3600,First"
    );
    assert_eq!(
        lines[2],
        "JM-2,04/06/2021_00:00,,\
         01/05/2021_00:00;Unknown;report.txt;http://server/path/report.txt,bad;data,Second"
    );

    assert_eq!(report.rows, 2);
    assert_eq!(report.skipped(), 1);
    let columns: Vec<(&str, ColumnKind)> = report
        .columns
        .iter()
        .map(|stats| (stats.column.as_str(), stats.kind))
        .collect();
    assert_eq!(
        columns,
        vec![
            ("Created", ColumnKind::Date),
            ("Comment", ColumnKind::Compound),
            ("Attachment", ColumnKind::Compound),
            ("Log Work", ColumnKind::Compound),
        ]
    );

    let attachment = &report.columns[2];
    assert_eq!(
        (attachment.cells, attachment.resolved, attachment.rewritten, attachment.repaired),
        (2, 2, 2, 1)
    );
    let comment = &report.columns[1];
    assert_eq!((comment.cells, comment.repaired), (1, 1));
    let work_log = &report.columns[3];
    assert_eq!((work_log.resolved, work_log.skipped), (1, 1));
}

#[test]
fn second_pass_is_a_fixed_point() {
    let (first, _) = run(EXPORT, options(OnUnresolved::Skip), &NoEscalation).unwrap();
    let (second, report) = run(&first, options(OnUnresolved::Skip), &NoEscalation).unwrap();

    assert_eq!(first, second);
    assert_eq!(report.rewritten(), 0);
}

#[test]
fn abort_reports_location() {
    let err = run(EXPORT, options(OnUnresolved::Abort), &NoEscalation).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("row 2, column \"Log Work\""), "{message}");
    assert!(message.contains("[REDACTED]"), "{message}");
}

#[test]
fn unrecognized_date_follows_policy() {
    let input = "Key,Created\nJM-1,someday\nJM-2,2021-06-04\n";

    let err = run(input, options(OnUnresolved::Abort), &NoEscalation).unwrap_err();
    assert!(err.to_string().contains("row 1"));

    let (output, report) = run(input, options(OnUnresolved::Skip), &NoEscalation).unwrap();
    assert_eq!(output, "Key,Created\nJM-1,someday\nJM-2,04/06/2021_00:00\n");
    assert_eq!(report.columns[0].skipped, 1);
}

#[test]
fn corrections_are_applied_and_counted() {
    let mut corrections = CorrectionTable::new();
    corrections.insert("bad;data", "bad;2021-05-01;jdoe;60");

    let (output, report) = run(EXPORT, options(OnUnresolved::Abort), &corrections).unwrap();

    assert!(output.contains(",bad;01/05/2021_00:00;jdoe;60,Second"));
    assert_eq!(report.columns[3].escalated, 1);
    assert_eq!(report.skipped(), 0);
}

#[test]
fn custom_target_format() {
    let options = ScanOptions {
        format: FormatSpec::new("%Y-%m-%dT%H:%M").unwrap(),
        ..options(OnUnresolved::Abort)
    };
    let input = "Key,Created\nJM-1,\"Dec 01, 2019 12:00 PM\"\n";
    let (output, _) = run(input, options, &NoEscalation).unwrap();
    assert_eq!(output, "Key,Created\nJM-1,2019-12-01T12:00\n");
}

#[test]
fn rejects_delimiter_in_target_format() {
    let options = ScanOptions {
        format: FormatSpec::new("%Y;%m").unwrap(),
        ..ScanOptions::default()
    };
    assert!(run(EXPORT, options, &NoEscalation).is_err());
}

#[test]
fn config_file_extends_schemas() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jmig.toml");
    fs::write(
        &path,
        "on_unresolved = \"skip\"\n\n[schemas]\n\"Audit Trail\" = [\"datetime\", \"username\", \"comment\"]\n",
    )
    .unwrap();
    let config = Config::load(&path).unwrap();
    let registry = config.registry().unwrap();

    let scanner = Scanner::new(
        &registry,
        default_table(),
        &NoEscalation,
        ScanOptions {
            on_unresolved: config.on_unresolved,
            ..ScanOptions::default()
        },
    )
    .unwrap();
    let mut output = Vec::new();
    let report = scanner
        .scan(
            "Key,Audit Trail\nJM-1,2021-05-01;jdoe;moved; twice\n".as_bytes(),
            &mut output,
            &ProgressBar::hidden(),
        )
        .unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Key,Audit Trail\nJM-1,01/05/2021_00:00;jdoe;moved%3b twice\n"
    );
    assert_eq!(report.columns[0].repaired, 1);
}

#[test]
fn scan_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).unwrap();
    let file = fs::File::open(&path).unwrap();

    let registry = SchemaRegistry::builtin();
    let scanner = Scanner::new(
        &registry,
        default_table(),
        &NoEscalation,
        options(OnUnresolved::Skip),
    )
    .unwrap();
    let mut output = Vec::new();
    let report = scanner
        .scan(file, &mut output, &ProgressBar::hidden())
        .unwrap();
    assert_eq!(report.rows, 2);
}
