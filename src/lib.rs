//! Log Pattern Extractor (logpat) Library
//!
//! A Rust library for mining log print statements from C/C++ source trees
//! and compiling their printf-style format strings into regex patterns
//! that match the rendered runtime log output.

pub mod batch;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod output;
pub mod pattern;
pub mod scan;
pub mod tokens;

pub use chunk::{Chunk, TokenSplitter};
pub use config::Config;
pub use output::OutputFormat;
pub use scan::{MatchRecord, ScanState, StatementAccumulator, WatchedNames};
pub use tokens::{ApproxTokenCounter, TokenCountError, TokenCounter};
