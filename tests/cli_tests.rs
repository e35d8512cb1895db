//! End-to-end CLI tests: exercise the binary the way a user would,
//! against the sample code table in `data/`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const SAMPLE_TABLE: &str = "data/sample_codes.csv";

fn cmsify() -> Command {
    Command::cargo_bin("cmsify").expect("binary builds")
}

#[test]
fn convert_note_file_reports_coded_problem() {
    let mut note = tempfile::NamedTempFile::new().unwrap();
    write!(note, "DM2 on metformin, sugars okay.").unwrap();

    cmsify()
        .args(["convert", "--table", SAMPLE_TABLE])
        .arg(note.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# CMS-Ready Problem List"))
        .stdout(predicate::str::contains(
            "Type 2 diabetes mellitus without complication (E11.9)",
        ))
        .stdout(predicate::str::contains("on metformin, glucose stable"))
        .stdout(predicate::str::contains("no supporting data").not());
}

#[test]
fn convert_reads_note_from_stdin() {
    cmsify()
        .args(["convert", "--table", SAMPLE_TABLE])
        .write_stdin("Mild AKI likely prerenal.")
        .assert()
        .success()
        .stdout(predicate::str::contains("N17.9"))
        .stdout(predicate::str::contains("Acute kidney failure, unspecified"))
        .stdout(predicate::str::contains("no supporting data"));
}

#[test]
fn convert_with_no_clinical_terms_prints_header_only() {
    cmsify()
        .args(["convert", "--table", SAMPLE_TABLE])
        .write_stdin("Patient comfortable. Family at bedside.")
        .assert()
        .success()
        .stdout("# CMS-Ready Problem List\n");
}

#[test]
fn convert_include_unmatched_lists_no_code_marker() {
    cmsify()
        .args(["convert", "--include-unmatched", "--table", SAMPLE_TABLE])
        .write_stdin("DM2 on metformin, sugars okay.")
        .assert()
        .success()
        .stdout(predicate::str::contains("sugars okay — no code found"));
}

#[test]
fn convert_missing_table_fails_with_nonzero_exit() {
    cmsify()
        .args(["convert", "--table", "no_such_table.csv"])
        .write_stdin("DM2.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load code table"));
}

#[test]
fn convert_malformed_table_fails() {
    let mut table = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
    write!(table, "ShortDesc,LongDesc\nfoo,bar\n").unwrap();

    cmsify()
        .arg("convert")
        .arg("--table")
        .arg(table.path())
        .write_stdin("DM2.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"));
}

#[test]
fn convert_missing_note_file_fails() {
    cmsify()
        .args(["convert", "--table", SAMPLE_TABLE, "no_such_note.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read note"));
}

#[test]
fn convert_json_format_carries_scores() {
    cmsify()
        .args(["convert", "--table", SAMPLE_TABLE, "--format", "json"])
        .write_stdin("Mild AKI likely prerenal.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"N17.9\""))
        .stdout(predicate::str::contains("\"composite\""))
        .stdout(predicate::str::contains("\"no_supporting_data\": true"));
}

#[test]
fn convert_writes_report_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.txt");

    cmsify()
        .args(["convert", "--table", SAMPLE_TABLE, "--output"])
        .arg(&out)
        .write_stdin("Mild AKI likely prerenal.")
        .assert()
        .success()
        .stdout("");

    let report = std::fs::read_to_string(&out).unwrap();
    assert!(report.contains("N17.9"));
}

#[test]
fn convert_strict_threshold_rejects_fuzzy_match() {
    cmsify()
        .args([
            "convert",
            "--table",
            SAMPLE_TABLE,
            "--threshold",
            "0.99",
            "--include-unmatched",
        ])
        .write_stdin("Mild AKI likely prerenal.")
        .assert()
        .success()
        .stdout(predicate::str::contains("no code found"))
        .stdout(predicate::str::contains("N17.9").not());
}

#[test]
fn score_ranks_the_expected_entry_first() {
    cmsify()
        .args(["score", "Mild AKI likely prerenal", "--table", SAMPLE_TABLE, "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 Acute kidney failure, unspecified (N17.9)"));
}

#[test]
fn table_list_shows_entries_and_count() {
    cmsify()
        .args(["table", "list", "--table", SAMPLE_TABLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("E11.9"))
        .stdout(predicate::str::contains("14 entries"));
}

#[test]
fn table_list_prefix_filters_codes() {
    cmsify()
        .args(["table", "list", "--table", SAMPLE_TABLE, "--prefix", "N1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N17.9"))
        .stdout(predicate::str::contains("E11.9").not())
        .stdout(predicate::str::contains("2 entries"));
}

#[test]
fn table_show_unknown_code_fails() {
    cmsify()
        .args(["table", "show", "Z99.99", "--table", SAMPLE_TABLE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn table_export_round_trips() {
    cmsify()
        .args(["table", "export", "--table", SAMPLE_TABLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Code,ShortDesc,LongDesc"))
        .stdout(predicate::str::contains("\"Acute kidney failure, unspecified\""));
}
