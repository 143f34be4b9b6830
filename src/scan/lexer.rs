//! Line-level lexing of C/C++ source.
//!
//! [`strip_line`] projects one raw source line onto its "code-only" form:
//! comment bodies and string/char literal contents are dropped, so that
//! downstream paren counting and call matching only ever see real code
//! characters. The state that survives a line boundary (open block comment,
//! open literal, pending escape) lives in [`ScanState`] and is threaded
//! through a sequential fold over the file's lines.

/// Lexing state carried from one line to the next within a single file.
///
/// One instance per file, created at open and discarded at close; never
/// shared across files. `string_delim` being set implies
/// `in_block_comment` is false: a literal can only open outside comments,
/// and comment openers inside literals are never recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Inside a `/* ... */` comment that has not closed yet.
    pub in_block_comment: bool,
    /// Delimiter of the currently open string/char literal, if any.
    pub string_delim: Option<char>,
    /// The previous character inside the literal was a backslash.
    pub pending_escape: bool,
}

impl ScanState {
    /// Fresh state for the top of a file.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Code-only projection of one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedLine {
    /// The line with comment bodies and literal contents removed.
    pub code: String,
    /// Net `(` minus `)` among the code characters of this line.
    pub paren_delta: i32,
}

/// Strip one raw line, updating `state` across the line boundary.
///
/// Rules, character by character:
/// - inside a block comment, consume until `*/`;
/// - inside a literal, honor backslash escapes and close on the matching
///   delimiter; every consumed character is dropped, so a `(` or `)`
///   inside a quoted string never reaches the paren delta;
/// - outside both, `/*` opens a comment, `//` discards the rest of the
///   line, `"` or `'` opens a literal, everything else is code.
///
/// If the line ends with a literal still open and the raw line does not
/// end in a `\` continuation, the literal is force-closed. That is a
/// lenient recovery heuristic for truncated or adversarial input, not
/// strict C semantics; exotic line splicing can misparse.
pub fn strip_line(raw: &str, state: &mut ScanState) -> StrippedLine {
    let mut code = String::with_capacity(raw.len());
    let mut paren_delta = 0i32;

    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        if state.in_block_comment {
            if ch == '*' && next == Some('/') {
                state.in_block_comment = false;
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }

        if let Some(delim) = state.string_delim {
            if state.pending_escape {
                state.pending_escape = false;
            } else if ch == '\\' {
                state.pending_escape = true;
            } else if ch == delim {
                state.string_delim = None;
            }
            i += 1;
            continue;
        }

        match ch {
            '/' if next == Some('*') => {
                state.in_block_comment = true;
                i += 2;
            }
            '/' if next == Some('/') => break,
            '"' | '\'' => {
                state.string_delim = Some(ch);
                i += 1;
            }
            _ => {
                code.push(ch);
                match ch {
                    '(' => paren_delta += 1,
                    ')' => paren_delta -= 1,
                    _ => {}
                }
                i += 1;
            }
        }
    }

    // Unterminated literal at end of line: carry it over only when the
    // line is spliced onto the next with a trailing backslash.
    if state.string_delim.is_some() && !raw.trim_end().ends_with('\\') {
        state.string_delim = None;
        state.pending_escape = false;
    }

    StrippedLine { code, paren_delta }
}
