//! Log Pattern Extractor - CLI entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

use logpat::batch::BatchBuilder;
use logpat::chunk::TokenSplitter;
use logpat::cli::{Cli, Commands, ConfigCommands};
use logpat::config::Config;
use logpat::output::{self, OutputFormat};
use logpat::pattern::{compile, extract_literal, is_noise, tidy};
use logpat::scan::{discover_names, scan_root, MatchRecord, WatchedNames};
use logpat::tokens::ApproxTokenCounter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            root,
            names,
            out,
            format,
            limit,
            patterns,
        } => cmd_scan(
            &root,
            names.as_deref(),
            out.as_deref(),
            format,
            limit,
            patterns.as_deref(),
        ),
        Commands::Names { input, out } => cmd_names(&input, out.as_deref()),
        Commands::Convert {
            input,
            out,
            from_report,
            keep_noise,
        } => cmd_convert(&input, out.as_deref(), from_report, keep_noise),
        Commands::Chunk {
            input,
            max_tokens,
            overlap,
            out_dir,
        } => cmd_chunk(&input, max_tokens, overlap, out_dir.as_deref()),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cmd_config_show(),
            ConfigCommands::Edit => cmd_config_edit(),
        },
    }
}

fn cmd_scan(
    root: &Path,
    names: Option<&Path>,
    out: Option<&Path>,
    format: Option<OutputFormat>,
    limit: usize,
    patterns: Option<&Path>,
) -> Result<()> {
    let config = Config::load()?;
    let names_path = names
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.scan.names_file));
    let watched = WatchedNames::load(&names_path)?;
    if watched.is_empty() {
        bail!("Name list is empty: {}", names_path.display());
    }
    println!(
        "Watching {} call names from {}",
        watched.len(),
        names_path.display()
    );

    let records = scan_root(root, &watched, config.scan.max_statement_lines);

    println!("Total matches: {}", records.len());
    for (name, count) in output::summarize(&records) {
        println!("{name}: {count}");
    }
    if limit > 0 {
        println!("Sample:");
        for record in records.iter().take(limit) {
            println!(
                "{}:{}\t{}\t{}",
                record.file.display(),
                record.line,
                record.name,
                record.text
            );
        }
    }

    if let Some(out) = out {
        let format = format.unwrap_or(config.output.format);
        output::write_records(out, &records, format)?;
        println!("Results written to {}", out.display());
    }

    if let Some(patterns_path) = patterns {
        let count = write_patterns(patterns_path, &records)?;
        println!(
            "{} regex patterns written to {}",
            count,
            patterns_path.display()
        );
    }

    Ok(())
}

/// Compile the distinct format strings of the matched records.
fn write_patterns(path: &Path, records: &[MatchRecord]) -> Result<usize> {
    let mut formats = BTreeSet::new();
    for record in records {
        if let Some(literal) = extract_literal(&record.text) {
            let literal = tidy(&literal);
            if !is_noise(&literal) {
                formats.insert(literal);
            }
        }
    }

    let mut body = String::new();
    for format in &formats {
        body.push_str(&compile(format));
        body.push('\n');
    }
    fs::write(path, body)
        .with_context(|| format!("Failed to write patterns: {}", path.display()))?;
    Ok(formats.len())
}

fn cmd_names(input: &Path, out: Option<&Path>) -> Result<()> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read input: {}", input.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let names = discover_names(&text);
    if names.is_empty() {
        println!("No call names found.");
        return Ok(());
    }

    println!("Found {} unique call names.", names.len());
    for name in &names {
        println!("{name}");
    }

    if let Some(out) = out {
        let mut body = names.iter().cloned().collect::<Vec<_>>().join("\n");
        body.push('\n');
        fs::write(out, body)
            .with_context(|| format!("Failed to write name list: {}", out.display()))?;
        println!("Results written to {}", out.display());
    }
    Ok(())
}

fn cmd_convert(input: &Path, out: Option<&Path>, from_report: bool, keep_noise: bool) -> Result<()> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read input: {}", input.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let formats: Vec<String> = if from_report {
        text.lines()
            .filter_map(|line| line.trim().strip_prefix("Content:"))
            .map(|content| content.trim().to_string())
            .collect()
    } else {
        text.lines().map(|line| line.to_string()).collect()
    };

    let mut patterns = Vec::new();
    let mut skipped = 0usize;
    for format in &formats {
        let tidied = tidy(format);
        if !keep_noise && is_noise(&tidied) {
            skipped += 1;
            continue;
        }
        patterns.push(compile(&tidied));
    }

    println!(
        "Compiled {} patterns ({} trivial lines skipped).",
        patterns.len(),
        skipped
    );

    match out {
        Some(out) => {
            let mut body = patterns.join("\n");
            body.push('\n');
            fs::write(out, body)
                .with_context(|| format!("Failed to write patterns: {}", out.display()))?;
            println!("Results written to {}", out.display());
        }
        None => {
            for pattern in &patterns {
                println!("{pattern}");
            }
        }
    }
    Ok(())
}

fn cmd_chunk(
    input: &Path,
    max_tokens: Option<usize>,
    overlap: Option<usize>,
    out_dir: Option<&Path>,
) -> Result<()> {
    let config = Config::load()?;
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read input: {}", input.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let splitter = TokenSplitter::new(
        max_tokens.unwrap_or(config.chunk.max_tokens),
        overlap.unwrap_or(config.chunk.overlap_tokens),
    );
    let counter = ApproxTokenCounter;
    let chunks = splitter.split(&text, &counter);

    println!(
        "Split {} tokens into {} chunks.",
        counter.count_infallible(&text),
        chunks.len()
    );
    for (index, chunk) in chunks.iter().enumerate() {
        println!("Chunk {} ({} tokens)", index + 1, chunk.token_count);
    }

    // Batch preview helps size the downstream classifier calls.
    let builder = BatchBuilder::new(config.chunk.batch_token_limit);
    let batches = builder.build(text.lines(), &counter);
    println!(
        "{} classifier batches at {} tokens.",
        batches.len(),
        config.chunk.batch_token_limit
    );

    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        for (index, chunk) in chunks.iter().enumerate() {
            let path = dir.join(format!("chunk_{:03}.txt", index + 1));
            fs::write(&path, &chunk.text)
                .with_context(|| format!("Failed to write chunk: {}", path.display()))?;
        }
        println!("Chunks written to {}", dir.display());
    }
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let contents = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("# {}", Config::config_path()?.display());
    print!("{contents}");
    Ok(())
}

fn cmd_config_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = ProcessCommand::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to launch editor: {editor}"))?;
    if !status.success() {
        bail!("Editor exited with status: {status}");
    }
    Ok(())
}
