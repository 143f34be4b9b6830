//! Watched-name call matching and candidate-name discovery.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Left-trimmed prefixes that disqualify a line from call matching.
/// Declarations and preprocessor lines cannot contain a call statement of
/// interest and are a common source of false positives.
const SKIP_PREFIXES: [&str; 4] = ["#define", "#include", "typedef", "extern"];

/// Check whether a code-only line is a declaration/preprocessor line that
/// must be skipped before call matching.
pub fn is_directive(code_line: &str) -> bool {
    let trimmed = code_line.trim_start();
    SKIP_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

/// Start of a watched call on a code-only line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallStart<'a> {
    /// The watched name that matched.
    pub name: &'a str,
    /// Byte offset of the match within the code-only line.
    pub offset: usize,
}

/// The set of log-style call names to watch for, with one compiled
/// word-boundary pattern per name. Built once from the externally
/// supplied name list, never re-compiled per line.
pub struct WatchedNames {
    patterns: Vec<(String, Regex)>,
}

impl WatchedNames {
    /// Compile patterns for an ordered list of names.
    ///
    /// Matching is case-insensitive on a word boundary, `name (` included.
    /// `fprintf` is special-cased to its `stderr` form: plain
    /// `fprintf(file, ...)` is overwhelmingly not a log statement.
    pub fn compile<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let pattern = if name.eq_ignore_ascii_case("fprintf") {
                r"\bfprintf\s*\(\s*stderr\s*,".to_string()
            } else {
                format!(r"\b{}\s*\(", regex::escape(name))
            };
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid watched name: {:?}", name))?;
            patterns.push((name.to_string(), regex));
        }
        Ok(Self { patterns })
    }

    /// Load and compile a plain-text name list, one name per line.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read name list: {}", path.display()))?;
        Self::compile(contents.lines())
    }

    /// Number of watched names.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no names are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Earliest-starting watched call on a code-only line.
    ///
    /// Every name is tried and the lowest match offset wins; on a tie the
    /// first name in list order is kept (distinct names cannot start at
    /// the same offset in practice).
    pub fn find_start(&self, code_line: &str) -> Option<CallStart<'_>> {
        let mut best: Option<CallStart<'_>> = None;
        for (name, regex) in &self.patterns {
            if let Some(found) = regex.find(code_line) {
                let better = best.map_or(true, |b| found.start() < b.offset);
                if better {
                    best = Some(CallStart {
                        name,
                        offset: found.start(),
                    });
                }
            }
        }
        best
    }
}

fn name_before_quote() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // An identifier, an opening paren, and a double quote before the
        // argument window closes: the shape of a call carrying an inline
        // format string.
        Regex::new(r#"([a-zA-Z_][a-zA-Z0-9_]*)\s*\([^)]*""#).expect("literal pattern")
    })
}

/// Harvest candidate log-call names from an arbitrary source dump.
///
/// Returns the sorted, deduplicated set of identifiers that appear
/// directly before a `(` whose visible arguments contain a string
/// literal. The result is raw: it is meant to be reviewed and pruned
/// before being used as a watched-name list.
pub fn discover_names(text: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for line in text.lines() {
        for captures in name_before_quote().captures_iter(line) {
            names.insert(captures[1].to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watched(names: &[&str]) -> WatchedNames {
        WatchedNames::compile(names.iter().copied()).unwrap()
    }

    #[test]
    fn finds_simple_call() {
        let names = watched(&["ALOGE"]);
        let start = names.find_start(r#"    ALOGE(x);"#).unwrap();
        assert_eq!(start.name, "ALOGE");
        assert_eq!(start.offset, 4);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let names = watched(&["LOGE"]);
        assert!(names.find_start("loge(x);").is_some());
    }

    #[test]
    fn word_boundary_excludes_suffix_names() {
        let names = watched(&["LOG"]);
        assert!(names.find_start("DLOG(x);").is_none());
        assert!(names.find_start("LOG (x);").is_some());
    }

    #[test]
    fn earliest_offset_wins() {
        let names = watched(&["LOGW", "LOGE"]);
        let line = "LOGE(a); LOGW(b);";
        assert_eq!(names.find_start(line).unwrap().name, "LOGE");
    }

    #[test]
    fn fprintf_requires_stderr() {
        let names = watched(&["fprintf"]);
        assert!(names.find_start("fprintf(stderr, x);").is_some());
        assert!(names.find_start("fprintf( stderr , x);").is_some());
        assert!(names.find_start("fprintf(logfile, x);").is_none());
    }

    #[test]
    fn blank_name_lines_are_ignored() {
        let names = WatchedNames::compile(["ALOGE", "", "  "]).unwrap();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn directive_lines_are_flagged() {
        assert!(is_directive("#define LOG_TAG "));
        assert!(is_directive("  #include <stdio.h>"));
        assert!(is_directive("typedef int (*cb)(void);"));
        assert!(is_directive("extern void log_print(const char *);"));
        assert!(!is_directive("int x = LOG(y);"));
    }

    #[test]
    fn discovers_names_before_quoted_arguments() {
        let text = "ALOGE(\"x %d\", v);\nif (x > 0) { log_print(\"y\"); }\n";
        let names = discover_names(text);
        assert!(names.contains("ALOGE"));
        assert!(names.contains("log_print"));
        assert!(!names.contains("if"));
    }

    #[test]
    fn discovery_deduplicates() {
        let text = "LOG(\"a\");\nLOG(\"b\");\n";
        assert_eq!(discover_names(text).len(), 1);
    }
}
