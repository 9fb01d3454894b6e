use std::fs;
use std::path::Path;

use assert_cmd::Command;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;

const ANTHROPIC_NAME: &str = "2024-07-04 Anthropic $42.00 Card-4242.pdf";

fn rcpt() -> Command {
    Command::cargo_bin("rcpt").unwrap()
}

/// A one-page receipt PDF with each line on its own row.
fn receipt_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![50.into(), 750.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn anthropic_pdf() -> Vec<u8> {
    receipt_pdf(&[
        "Anthropic, PBC",
        "Date paid July 4, 2024",
        "Amount paid $42.00",
        "Visa - 4242",
    ])
}

/// Same length as `bytes`, different content.
fn same_size_variant(bytes: &[u8]) -> Vec<u8> {
    let mut other = bytes.to_vec();
    let last = other.len() - 1;
    other[last] = if other[last] == b'x' { b'y' } else { b'x' };
    other
}

fn write_config(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn receipt_is_renamed() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("scan.pdf");
    fs::write(&source, anthropic_pdf()).unwrap();

    rcpt()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "RENAME scan.pdf -> {}",
            ANTHROPIC_NAME
        )))
        .stdout(predicate::str::contains(
            "Summary: processed=1 renamed=1 deleted=0 unchanged=0 conflicts=0 errors=0",
        ));

    assert!(!source.exists());
    assert_eq!(
        fs::read(dir.path().join(ANTHROPIC_NAME)).unwrap(),
        anthropic_pdf()
    );
}

#[test]
fn duplicate_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("scan.pdf");
    fs::write(&source, anthropic_pdf()).unwrap();
    fs::write(dir.path().join(ANTHROPIC_NAME), anthropic_pdf()).unwrap();

    rcpt()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "DELETE-DUPLICATE scan.pdf (same as {})",
            ANTHROPIC_NAME
        )));

    assert!(!source.exists());
    assert!(dir.path().join(ANTHROPIC_NAME).exists());
}

#[test]
fn dry_run_duplicate_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("scan.pdf");
    fs::write(&source, anthropic_pdf()).unwrap();
    fs::write(dir.path().join(ANTHROPIC_NAME), anthropic_pdf()).unwrap();

    rcpt()
        .arg("--dry-run")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "DELETE-DUPLICATE scan.pdf (would delete; same as {})",
            ANTHROPIC_NAME
        )));

    assert!(source.exists());
}

#[test]
fn dry_run_rename_is_not_applied() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("scan.pdf");
    fs::write(&source, anthropic_pdf()).unwrap();

    rcpt()
        .arg("--dry-run")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "RENAME scan.pdf -> {}",
            ANTHROPIC_NAME
        )));

    assert!(source.exists());
    assert!(!dir.path().join(ANTHROPIC_NAME).exists());
}

#[test]
fn same_size_target_counts_as_duplicate_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = anthropic_pdf();
    fs::write(dir.path().join("scan.pdf"), &pdf).unwrap();
    fs::write(dir.path().join(ANTHROPIC_NAME), same_size_variant(&pdf)).unwrap();

    rcpt()
        .arg("--dry-run")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE-DUPLICATE scan.pdf"));
}

#[test]
fn compare_sha256_flag_keeps_differing_target() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = anthropic_pdf();
    let source = dir.path().join("scan.pdf");
    fs::write(&source, &pdf).unwrap();
    let variant = same_size_variant(&pdf);
    fs::write(dir.path().join(ANTHROPIC_NAME), &variant).unwrap();

    rcpt()
        .arg("--compare")
        .arg("sha256")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "WARNING scan.pdf -> {} exists and differs; skipped",
            ANTHROPIC_NAME
        )))
        .stdout(predicate::str::contains("conflicts=1"));

    assert!(source.exists());
    assert_eq!(fs::read(dir.path().join(ANTHROPIC_NAME)).unwrap(), variant);
}

#[test]
fn config_file_selects_sha256_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = anthropic_pdf();
    fs::write(dir.path().join("scan.pdf"), &pdf).unwrap();
    fs::write(dir.path().join(ANTHROPIC_NAME), same_size_variant(&pdf)).unwrap();
    let conf_dir = tempfile::tempdir().unwrap();
    let config = write_config(conf_dir.path(), r#"{"rename":{"comparison":"sha256"}}"#);

    rcpt()
        .arg("-c")
        .arg(&config)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("conflicts=1"));

    assert!(dir.path().join("scan.pdf").exists());
}

#[test]
fn compare_flag_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = anthropic_pdf();
    fs::write(dir.path().join("scan.pdf"), &pdf).unwrap();
    fs::write(dir.path().join(ANTHROPIC_NAME), same_size_variant(&pdf)).unwrap();
    let conf_dir = tempfile::tempdir().unwrap();
    let config = write_config(conf_dir.path(), r#"{"rename":{"comparison":"sha256"}}"#);

    rcpt()
        .arg("-c")
        .arg(&config)
        .arg("--compare")
        .arg("size")
        .arg("--dry-run")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE-DUPLICATE scan.pdf"));
}

#[test]
fn config_file_enables_recursion() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("2024");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("scan.pdf"), anthropic_pdf()).unwrap();
    let conf_dir = tempfile::tempdir().unwrap();
    let config = write_config(conf_dir.path(), r#"{"scan":{"recursive":true}}"#);

    rcpt()
        .arg("--config")
        .arg(&config)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("renamed=1"));

    assert!(nested.join(ANTHROPIC_NAME).exists());
}

#[test]
fn empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    rcpt()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No eligible files"));
}

#[test]
fn already_canonical_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2024-07-04 Anthropic $42.00.pdf"), b"x").unwrap();

    rcpt()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No eligible files"));
}

#[test]
fn unreadable_pdf_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("scan.pdf");
    fs::write(&garbage, b"definitely not a pdf").unwrap();

    rcpt()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING scan.pdf: unexpected error"))
        .stdout(predicate::str::contains(
            "Summary: processed=1 renamed=0 deleted=0 unchanged=0 conflicts=0 errors=1",
        ));

    assert!(garbage.exists());
}

#[test]
fn dry_run_reports_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("scan.pdf");
    fs::write(&garbage, b"definitely not a pdf").unwrap();

    rcpt()
        .arg("--dry-run")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(fs::read(&garbage).unwrap(), b"definitely not a pdf");
}

#[test]
fn recursive_flag_includes_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("2024");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("scan.pdf"), b"junk").unwrap();

    rcpt().arg(dir.path()).assert().failure();

    rcpt()
        .arg("--recursive")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("processed=1"));
}

#[test]
fn summary_csv_is_written() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scan.pdf"), b"junk").unwrap();
    let out = tempfile::tempdir().unwrap();
    let summary = out.path().join("summary.csv");

    rcpt()
        .arg("--summary")
        .arg(&summary)
        .arg(dir.path())
        .assert()
        .success();

    let csv = fs::read_to_string(&summary).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("file,outcome,target,reason"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("scan.pdf,error,,"));
    assert!(row.contains("unexpected error"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scan.pdf"), b"junk").unwrap();

    rcpt()
        .arg("--config")
        .arg(dir.path().join("nope.json"))
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn not_a_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("scan.pdf");
    fs::write(&file, b"junk").unwrap();

    rcpt()
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}
