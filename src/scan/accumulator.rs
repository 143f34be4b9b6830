//! Per-file statement accumulation.
//!
//! [`StatementAccumulator`] is the small state machine that turns a
//! stream of stripped lines into complete call statements. It idles until
//! a watched call starts, buffers raw lines while the argument list stays
//! open, and emits one [`MatchRecord`] when a semicolon shows up with the
//! parens balanced. A statement that refuses to close within the line cap
//! is abandoned so malformed input cannot poison the rest of the file.

use super::lexer::StrippedLine;
use super::matcher::{is_directive, WatchedNames};
use std::path::PathBuf;

/// Default cap on raw lines buffered for one call before it is abandoned.
pub const MAX_STATEMENT_LINES: usize = 50;

/// One matched log-style call statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Source file the statement was found in.
    pub file: PathBuf,
    /// 1-indexed line the call started on.
    pub line: u32,
    /// The watched name that matched.
    pub name: String,
    /// Buffered statement text, raw lines joined by single spaces.
    pub text: String,
}

/// A call that has started but not yet closed.
struct PendingCall {
    name: String,
    start_line: u32,
    buffer: Vec<String>,
    paren_balance: i32,
}

/// Statement state machine for one file: `Idle -> InCall -> Idle`, either
/// by emission (semicolon at paren balance <= 0) or by abandonment (line
/// cap exceeded).
pub struct StatementAccumulator<'a> {
    file: PathBuf,
    names: &'a WatchedNames,
    max_lines: usize,
    pending: Option<PendingCall>,
}

impl<'a> StatementAccumulator<'a> {
    /// Accumulator for one file with the given buffering cap.
    pub fn new(file: PathBuf, names: &'a WatchedNames, max_lines: usize) -> Self {
        Self {
            file,
            names,
            max_lines,
            pending: None,
        }
    }

    /// True while a call is open and buffering.
    pub fn in_call(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one raw line with its stripped projection. Line numbers are
    /// 1-indexed. Returns a record when this line closes a call.
    ///
    /// The close condition is joint: a semicolon alone is not enough while
    /// unbalanced parens remain open (an argument may contain `;`), and a
    /// balanced paren count alone is not enough before the statement
    /// terminator arrives.
    pub fn feed(&mut self, line_no: u32, raw: &str, stripped: &StrippedLine) -> Option<MatchRecord> {
        match self.pending.take() {
            None => {
                if is_directive(&stripped.code) {
                    return None;
                }
                let start = self.names.find_start(&stripped.code)?;
                let pending = PendingCall {
                    name: start.name.to_string(),
                    start_line: line_no,
                    buffer: vec![raw.to_string()],
                    paren_balance: paren_count(&stripped.code[start.offset..]),
                };
                self.close_or_keep(pending, &stripped.code)
            }
            Some(mut pending) => {
                pending.buffer.push(raw.to_string());
                pending.paren_balance += stripped.paren_delta;
                self.close_or_keep(pending, &stripped.code)
            }
        }
    }

    fn close_or_keep(&mut self, pending: PendingCall, code_line: &str) -> Option<MatchRecord> {
        if code_line.contains(';') && pending.paren_balance <= 0 {
            return Some(self.emit(pending));
        }
        if pending.buffer.len() > self.max_lines {
            // Abandon: discard the buffer, go back to scanning.
            return None;
        }
        self.pending = Some(pending);
        None
    }

    fn emit(&self, pending: PendingCall) -> MatchRecord {
        MatchRecord {
            file: self.file.clone(),
            line: pending.start_line,
            name: pending.name,
            text: pending.buffer.join(" ").trim().to_string(),
        }
    }
}

/// Net `(` minus `)` in a code-only slice.
fn paren_count(code: &str) -> i32 {
    let mut delta = 0i32;
    for ch in code.chars() {
        match ch {
            '(' => delta += 1,
            ')' => delta -= 1,
            _ => {}
        }
    }
    delta
}
