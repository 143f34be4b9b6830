//! CLI smoke tests for the logpat binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn logpat() -> Command {
    Command::cargo_bin("logpat").unwrap()
}

#[test]
fn scan_reports_and_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src/player.c"),
        "void play() {\n\
         ALOGE(\"start failed: %d\", err);\n\
         ALOGE(\"pts=%lld\", pts);\n\
         }\n",
    )
    .unwrap();
    fs::write(dir.path().join("names.txt"), "ALOGE\n").unwrap();
    let out = dir.path().join("calls.csv");

    logpat()
        .arg("scan")
        .arg("--root")
        .arg(dir.path().join("src"))
        .arg("--names")
        .arg(dir.path().join("names.txt"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total matches: 2"))
        .stdout(predicate::str::contains("ALOGE: 2"));

    let contents = fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("file,line,style,text\n"));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn scan_with_missing_name_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    logpat()
        .arg("scan")
        .arg("--root")
        .arg(dir.path())
        .arg("--names")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read name list"));
}

#[test]
fn names_harvests_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.txt");
    fs::write(&input, "ALOGE(\"x %d\", v);\nlog_print(\"y\");\n").unwrap();

    logpat()
        .arg("names")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 unique call names."))
        .stdout(predicate::str::contains("ALOGE"))
        .stdout(predicate::str::contains("log_print"));
}

#[test]
fn convert_compiles_format_strings() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("formats.txt");
    fs::write(&input, "value=%d and %s\n%s\n").unwrap();
    let out = dir.path().join("regex.txt");

    logpat()
        .arg("convert")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Compiled 1 patterns (1 trivial lines skipped).",
        ));

    let contents = fs::read_to_string(&out).unwrap();
    let pattern = contents.lines().next().unwrap();
    let regex = regex::Regex::new(pattern).unwrap();
    assert!(regex.is_match("value=42 and ok"));
    assert!(!regex.is_match("value=abc and ok"));
}

#[test]
fn chunk_reports_chunk_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.log");
    let corpus: String = (0..100).map(|i| format!("entry number {i}\n")).collect();
    fs::write(&input, corpus).unwrap();

    logpat()
        .arg("chunk")
        .arg(&input)
        .arg("--max-tokens")
        .arg("50")
        .arg("--overlap")
        .arg("10")
        .assert()
        .success()
        .stdout(predicate::str::contains("chunks."))
        .stdout(predicate::str::contains("Chunk 1"));
}
