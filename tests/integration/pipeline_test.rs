//! Source-to-regex pipeline: scan records through literal extraction and
//! pattern compilation, then chunking and batching on the result side.

use logpat::batch::{parse_response, BatchBuilder};
use logpat::chunk::TokenSplitter;
use logpat::pattern::{compile, extract_literal, is_noise, tidy};
use logpat::scan::{scan_root, WatchedNames};
use logpat::tokens::ApproxTokenCounter;
use regex::Regex;
use std::fs;

#[test]
fn scanned_statement_compiles_to_matching_regex() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("hal.c"),
        "void open_dev(int fd, const char *path) {\n\
         ALOGE(\"open %s failed: fd=%d\\n\",\n\
               path, fd);\n\
         }\n",
    )
    .unwrap();

    let names = WatchedNames::compile(["ALOGE"]).unwrap();
    let records = scan_root(dir.path(), &names, 50);
    assert_eq!(records.len(), 1);

    let literal = extract_literal(&records[0].text).unwrap();
    let literal = tidy(&literal);
    assert_eq!(literal, "open %s failed: fd=%d");
    assert!(!is_noise(&literal));

    let regex = Regex::new(&compile(&literal)).unwrap();
    assert!(regex.is_match("open /dev/video0 failed: fd=-1"));
    assert!(!regex.is_match("open /dev/video0 succeeded"));
}

#[test]
fn chunked_log_corpus_feeds_classifier_batches() {
    let corpus: String = (0..200)
        .map(|i| format!("line {i}: buffer underrun at pts {}\n", i * 40))
        .collect();

    let counter = ApproxTokenCounter;
    let splitter = TokenSplitter::new(256, 32);
    let chunks = splitter.split(&corpus, &counter);
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        // Budget holds for every chunk since no single line is oversized.
        assert!(chunk.token_count <= 256);
    }

    // Every chunk still splits cleanly into classifier batches.
    let builder = BatchBuilder::new(128);
    for chunk in &chunks {
        let batches = builder.build(chunk.text.lines(), &counter);
        assert!(!batches.is_empty());
        let total: usize = batches.iter().map(|b| b.items.len()).sum();
        assert_eq!(total, chunk.text.lines().filter(|l| !l.trim().is_empty()).count());
    }
}

#[test]
fn classifier_reply_resolves_against_batch() {
    let counter = ApproxTokenCounter;
    let builder = BatchBuilder::new(512);
    let batches = builder.build(
        ["vdec init ok", "ioctl VIDIOC_QBUF failed: errno=16", "eos reached"],
        &counter,
    );
    assert_eq!(batches.len(), 1);

    let reply = "SUSPICIOUS_ID: 2 | REASON: ioctl failure\nNONE";
    let suspicions = parse_response(reply);
    assert_eq!(suspicions.len(), 1);

    let flagged = &batches[0]
        .items
        .iter()
        .find(|item| item.id == suspicions[0].id)
        .unwrap()
        .line;
    assert_eq!(flagged, "ioctl VIDIOC_QBUF failed: errno=16");
}
