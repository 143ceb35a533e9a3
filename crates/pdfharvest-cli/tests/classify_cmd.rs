mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{PageSpec, write_temp_pdf};

fn cmd() -> Command {
    Command::cargo_bin("pdfharvest").unwrap()
}

#[test]
fn classify_prints_headings_per_page() {
    let pdf = write_temp_pdf(vec![
        PageSpec::text(&["Chapter 2: Methods", "Section A", "Details"]),
        PageSpec::text(&[]),
    ]);

    cmd()
        .arg("classify")
        .arg(pdf.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--- Page 1 ---\nChapter: Methods\nSubsection: Section A",
        ))
        .stdout(predicate::str::contains(
            "--- Page 2 ---\nChapter: Unknown Chapter\nSubsection: Unknown Subsection",
        ));
}

#[test]
fn classify_uppercase_strategy_with_untitled_labels() {
    let pdf = write_temp_pdf(vec![PageSpec::text(&["OVERVIEW", "text"])]);

    cmd()
        .arg("classify")
        .arg(pdf.path())
        .args(["--headings", "uppercase", "--untitled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter: OVERVIEW"))
        .stdout(predicate::str::contains("Subsection: Untitled Subsection"));
}

#[test]
fn classify_json_output() {
    let pdf = write_temp_pdf(vec![PageSpec::text(&["Alpha", "Beta", "Gamma"])]);

    let output = cmd()
        .arg("classify")
        .arg(pdf.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["page"], 1);
    assert_eq!(json[0]["chapter"], "Alpha");
    assert_eq!(json[0]["subsection"], "Beta");
    assert_eq!(json[0]["body"], "Alpha\nBeta\nGamma");
}

#[test]
fn classify_does_not_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_temp_pdf(vec![PageSpec::text(&["Hello"])]);

    cmd()
        .current_dir(dir.path())
        .arg("classify")
        .arg(pdf.path())
        .assert()
        .success();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
