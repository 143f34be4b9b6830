//! Token counting for chunking and batching.
//!
//! Counting is usually backed by the tokenizer of whatever model consumes
//! the chunks, which makes it a remote, failure-prone dependency. It
//! therefore lives behind the [`TokenCounter`] trait, and every consumer
//! degrades to the local [`ApproxTokenCounter`] instead of aborting when
//! the real counter fails.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from token-counting collaborators.
#[derive(Debug, Error)]
pub enum TokenCountError {
    #[error("token counter unavailable: {0}")]
    Unavailable(String),

    #[error("token counter returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// A pluggable token counter.
///
/// Implementations may fail; callers must recover with
/// [`ApproxTokenCounter`] rather than abort the surrounding computation.
pub trait TokenCounter {
    /// Count the tokens in `text`.
    fn count(&self, text: &str) -> Result<usize, TokenCountError>;
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Words, punctuation runs, and whitespace runs each count as one
    // token, so any text reconstructs exactly from its token list.
    PATTERN.get_or_init(|| Regex::new(r"\w+|[^\w\s]+|\s+").expect("literal pattern"))
}

/// Local approximate counter used as the fallback for failing remote
/// counters. Infallible by construction.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproxTokenCounter;

impl ApproxTokenCounter {
    /// Count without the `Result` wrapper, for fallback paths.
    pub fn count_infallible(&self, text: &str) -> usize {
        token_pattern().find_iter(text).count()
    }
}

impl TokenCounter for ApproxTokenCounter {
    fn count(&self, text: &str) -> Result<usize, TokenCountError> {
        Ok(self.count_infallible(text))
    }
}

/// Closure adapter, mostly for tests and for callers wrapping a client
/// they already own.
pub struct FnCounter<F>(pub F);

impl<F> TokenCounter for FnCounter<F>
where
    F: Fn(&str) -> Result<usize, TokenCountError>,
{
    fn count(&self, text: &str) -> Result<usize, TokenCountError> {
        (self.0)(text)
    }
}
