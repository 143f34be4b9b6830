//! End-to-end scanning over a synthetic source tree.

use logpat::scan::{scan_root, WatchedNames};
use std::fs;
use std::path::Path;

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn watched(names: &[&str]) -> WatchedNames {
    WatchedNames::compile(names.iter().copied()).unwrap()
}

#[test]
fn scans_tree_and_finds_multiline_calls() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "decoder/video.c",
        r#"#include <stdio.h>

static int decode(int frame) {
    ALOGE("decode failed: frame=%d",
          frame);
    return -1;
}
"#,
    );
    write(
        dir.path(),
        "decoder/audio.cpp",
        "void f() { ALOGW(\"channel mask %u\", mask); }\n",
    );
    write(dir.path(), "README.md", "ALOGE(\"not source\");\n");

    let names = watched(&["ALOGE", "ALOGW"]);
    let mut records = scan_root(dir.path(), &names, 50);
    records.sort_by(|a, b| a.file.cmp(&b.file));

    assert_eq!(records.len(), 2);

    let aloge = records.iter().find(|r| r.name == "ALOGE").unwrap();
    assert!(aloge.file.ends_with("decoder/video.c"));
    assert_eq!(aloge.line, 4);
    let normalized: String = aloge.text.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(normalized, r#"ALOGE("decode failed: frame=%d", frame);"#);

    let alogw = records.iter().find(|r| r.name == "ALOGW").unwrap();
    assert!(alogw.file.ends_with("decoder/audio.cpp"));
}

#[test]
fn fprintf_only_matches_stderr_form() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "io.c",
        "void f() {\n\
         fprintf(stderr, \"err: %d\", e);\n\
         fprintf(logfile, \"info: %d\", e);\n\
         }\n",
    );

    let names = watched(&["fprintf"]);
    let records = scan_root(dir.path(), &names, 50);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].line, 2);
    assert!(records[0].text.contains("stderr"));
}

#[test]
fn directives_and_comments_do_not_match() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "tags.h",
        "#define LOG_TAG \"Decoder\"\n\
         // LOG(\"commented out\");\n\
         /* LOG(\"also\n\
            commented\"); */\n\
         extern void LOG(const char *fmt);\n",
    );

    let names = watched(&["LOG", "LOG_TAG"]);
    let records = scan_root(dir.path(), &names, 50);
    assert!(records.is_empty());
}

#[test]
fn runaway_call_is_abandoned_but_later_calls_survive() {
    let dir = tempfile::tempdir().unwrap();
    let mut body = String::from("LOG(\"opens but never closes\"\n");
    for _ in 0..60 {
        body.push_str("    arg,\n");
    }
    body.push_str("LOG(\"clean\");\n");
    write(dir.path(), "broken.c", &body);

    let names = watched(&["LOG"]);
    let records = scan_root(dir.path(), &names, 50);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "LOG(\"clean\");");
}

#[test]
fn extension_match_is_case_insensitive_and_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.CXX", "LOG(\"one\");\n");
    write(dir.path(), "b.HPP", "LOG(\"two\");\n");
    write(dir.path(), "c.txt", "LOG(\"three\");\n");
    write(dir.path(), "d.py", "LOG(\"four\");\n");

    let names = watched(&["LOG"]);
    let records = scan_root(dir.path(), &names, 50);
    assert_eq!(records.len(), 2);
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.c");
    let mut bytes = b"LOG(\"ok %d\", v);\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0xfd]);
    bytes.extend_from_slice(b"\nLOG(\"still ok\");\n");
    fs::write(&path, bytes).unwrap();

    let names = watched(&["LOG"]);
    let records = scan_root(dir.path(), &names, 50);
    assert_eq!(records.len(), 2);
}
