//! CLI definitions for logpat
//!
//! This module contains the clap CLI structure definitions, separated from
//! main.rs so the binary stays a thin dispatch layer.

use crate::output::OutputFormat;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build clap styles using our theme colors.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "logpat")]
#[command(
    about = "[ Log Pattern Extractor ] - mine log print statements from C/C++ sources and turn them into regexes!"
)]
#[command(
    long_about = "Log Pattern Extractor (logpat) - mine log print statements from C/C++ source trees.

logpat walks a source tree, finds calls to log-style functions and macros
(ALOGE, LOG, fprintf(stderr, ...) and friends), extracts their printf-style
format strings, and compiles those into regular expressions that match the
very same messages in runtime log output.

QUICK START:
    logpat names dump.txt --out names.txt     Harvest candidate call names
    logpat scan --root src/ --names names.txt --out calls.csv
    logpat convert formats.txt --out regex.txt
    logpat chunk big.log --max-tokens 2048

For more information, see: https://github.com/logpat/logpat"
)]
#[command(version, styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a source tree for watched log calls
    #[command(long_about = "Scan a C/C++ source tree for watched log-style calls.

Walks the root recursively, visiting .c .cc .cpp .h .hpp .cxx files
(case-insensitive), and reports every statement that invokes one of the
watched names, including calls whose argument list spans several lines.
A per-name summary is always printed; records go to --out when given.

EXAMPLES:
    logpat scan --root LibPlayer --names names.txt
    logpat scan --root . --names names.txt --out calls.csv --format csv
    logpat scan --root . --names names.txt --limit 10
    logpat scan --root . --names names.txt --patterns regex.txt")]
    Scan {
        /// Root directory of the source tree
        #[arg(long, default_value = ".", help = "Root directory to walk")]
        root: PathBuf,
        /// Watched-name list, one name per line (overrides config)
        #[arg(long, help = "File with one watched call name per line")]
        names: Option<PathBuf>,
        /// Output file for matched records
        #[arg(long, short, help = "Write matched records to this file")]
        out: Option<PathBuf>,
        /// Record format (defaults to the configured format)
        #[arg(long, value_enum, help = "Record format: csv or tsv")]
        format: Option<OutputFormat>,
        /// Print the first N records as a sample
        #[arg(long, default_value_t = 0, help = "Print the first N records")]
        limit: usize,
        /// Also compile the matched format strings into regex patterns
        #[arg(long, help = "Write compiled regex patterns to this file")]
        patterns: Option<PathBuf>,
    },

    /// Harvest candidate log-call names from a source dump
    #[command(long_about = "Harvest candidate log-call names from a source dump.

Collects every identifier that appears directly before a '(' whose visible
arguments contain a string literal - the shape of a log call with an inline
format string. The result is raw and meant to be reviewed and pruned before
being used as a watched-name list for 'logpat scan'.

EXAMPLE:
    logpat names log_print_dump.txt --out names.txt")]
    Names {
        /// Source dump to harvest from
        #[arg(help = "Text file to harvest call names from")]
        input: PathBuf,
        /// Output file for the sorted name list
        #[arg(long, short, help = "Write the name list to this file")]
        out: Option<PathBuf>,
    },

    /// Compile format strings into regex patterns
    #[command(long_about = "Compile printf-style format strings into regex patterns.

Reads one format string per line and emits one regex per line: literal text
is escaped, %d/%s/%x/... become fragments matching the rendered values, and
unknown specifiers pass through as literal text. Trivial inputs (a bare %s,
single characters) are skipped unless --keep-noise is given.

With --from-report the input is a classifier analysis report instead, and
only its 'Content:' lines are compiled.

EXAMPLES:
    logpat convert formats.txt --out regex.txt
    logpat convert analysis_report.txt --from-report --out regex.txt")]
    Convert {
        /// Format strings, one per line (or a report with --from-report)
        #[arg(help = "Input file of format strings")]
        input: PathBuf,
        /// Output file for the regex patterns
        #[arg(long, short, help = "Write the patterns to this file")]
        out: Option<PathBuf>,
        /// Input is an analysis report; compile only its Content: lines
        #[arg(long, help = "Read 'Content:' lines from an analysis report")]
        from_report: bool,
        /// Keep trivial patterns (bare %s, single characters)
        #[arg(long, help = "Do not drop trivial format strings")]
        keep_noise: bool,
    },

    /// Split a text file into token-budgeted chunks
    #[command(long_about = "Split a text file into chunks under a token budget.

Lines are never cut in half; each chunk starts with an overlap window of
whole lines repeated from the end of the previous chunk so a downstream
consumer keeps context across the seam. A single line larger than the
budget becomes its own oversized chunk.

EXAMPLES:
    logpat chunk big.log
    logpat chunk big.log --max-tokens 3072 --overlap 50
    logpat chunk big.log --out-dir chunks/")]
    Chunk {
        /// Text file to split
        #[arg(help = "Input file to split")]
        input: PathBuf,
        /// Token budget per chunk (defaults to the configured budget)
        #[arg(long, help = "Token budget per chunk")]
        max_tokens: Option<usize>,
        /// Overlap window in tokens (defaults to the configured overlap)
        #[arg(long, help = "Overlap window in tokens")]
        overlap: Option<usize>,
        /// Write each chunk to <out-dir>/chunk_NNN.txt
        #[arg(long, help = "Directory to write chunk files into")]
        out_dir: Option<PathBuf>,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the logpat configuration file.

Configuration is stored in ~/.config/logpat/config.toml and includes the
watched-name list location, the statement line cap, chunking budgets, and
the default output format.

EXAMPLES:
    logpat config show       Display current configuration
    logpat config edit       Open config in $EDITOR"
    )]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Open configuration file in your default editor
    Edit,
}
