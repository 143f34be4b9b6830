//! Match record serialization and reporting.

use crate::scan::MatchRecord;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialization format for scan records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `file,line,style,text` with a header row.
    Csv,
    /// `file:line<TAB>style<TAB>text`, no header.
    Tsv,
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    let needs_quoting = value
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write scan records to `path` in the requested format.
pub fn write_records(path: &Path, records: &[MatchRecord], format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    match format {
        OutputFormat::Csv => {
            writeln!(out, "file,line,style,text")?;
            for record in records {
                writeln!(
                    out,
                    "{},{},{},{}",
                    csv_field(&record.file.display().to_string()),
                    record.line,
                    csv_field(&record.name),
                    csv_field(&record.text),
                )?;
            }
        }
        OutputFormat::Tsv => {
            for record in records {
                writeln!(
                    out,
                    "{}:{}\t{}\t{}",
                    record.file.display(),
                    record.line,
                    record.name,
                    record.text,
                )?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Per-name match counts for the scan report, sorted by name.
pub fn summarize(records: &[MatchRecord]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for record in records {
        *stats.entry(record.name.clone()).or_insert(0) += 1;
    }
    stats
}
