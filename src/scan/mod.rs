//! Statement scanning for C/C++ source trees.
//!
//! This module finds log-style call statements in raw source without any
//! semantic understanding of C: no preprocessing, no AST. A single-pass
//! lexer tracks comment and string state across line boundaries, a
//! matcher looks for watched call names on the code-only projection, and
//! a per-file state machine buffers each call until its argument list
//! closes (or gives up at a line cap).
//!
//! # Module Structure
//!
//! - [`lexer`] - line stripping and the cross-line [`ScanState`]
//! - [`matcher`] - watched-name patterns and candidate-name discovery
//! - [`accumulator`] - the `Idle -> InCall` statement state machine
//! - [`walker`] - recursive, parallel directory scanning

mod accumulator;
mod lexer;
mod matcher;
mod walker;

pub use accumulator::{MatchRecord, StatementAccumulator, MAX_STATEMENT_LINES};
pub use lexer::{strip_line, ScanState, StrippedLine};
pub use matcher::{discover_names, is_directive, CallStart, WatchedNames};
pub use walker::{is_source_file, scan_file, scan_root, SOURCE_EXTENSIONS};
