//! Recursive source-tree scanning.

use super::accumulator::{MatchRecord, StatementAccumulator};
use super::lexer::{strip_line, ScanState};
use super::matcher::WatchedNames;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions recognized as C/C++ sources, compared case-insensitively.
pub const SOURCE_EXTENSIONS: [&str; 6] = ["c", "cc", "cpp", "h", "hpp", "cxx"];

/// Check whether a path looks like a C/C++ source file.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Scan one file for watched call statements.
///
/// The file is decoded lossily (malformed bytes become replacement
/// characters, never an error) and fed line by line through the lexer and
/// the statement accumulator. An unreadable file yields no records and a
/// warning; it never aborts the caller's walk.
pub fn scan_file(path: &Path, names: &WatchedNames, max_lines: usize) -> Vec<MatchRecord> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), %err, "skipping unreadable file");
            return Vec::new();
        }
    };
    let text = String::from_utf8_lossy(&bytes);

    let mut state = ScanState::new();
    let mut accumulator = StatementAccumulator::new(path.to_path_buf(), names, max_lines);
    let mut records = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let stripped = strip_line(raw, &mut state);
        if let Some(record) = accumulator.feed((index + 1) as u32, raw, &stripped) {
            records.push(record);
        }
    }
    records
}

/// Walk `root` recursively and scan every recognized source file.
///
/// Files are scanned in parallel; each file carries its own lexer and
/// accumulator state, so there is nothing shared to contend on. Records
/// within one file stay in source order, ordering across files is not
/// guaranteed and callers must not depend on it.
pub fn scan_root(root: &Path, names: &WatchedNames, max_lines: usize) -> Vec<MatchRecord> {
    let files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(%err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_source_file(path))
        .collect();

    debug!(root = %root.display(), files = files.len(), "walk complete");

    files
        .par_iter()
        .flat_map_iter(|path| scan_file(path, names, max_lines))
        .collect()
}
