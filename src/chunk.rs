//! Token-budgeted text splitting.
//!
//! Divides a text into chunks that fit a model's context window without
//! ever cutting a line in half. Neighboring chunks share a trailing
//! window of whole lines so the consumer keeps context across the seam.

use crate::tokens::{ApproxTokenCounter, TokenCounter};
use tracing::warn;

/// One output chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text; lines always appear whole.
    pub text: String,
    /// Token count of `text` at split time.
    pub token_count: usize,
}

/// Splits text under a token budget, line-preserving, with a whole-line
/// overlap window carried from each chunk into the next.
#[derive(Debug, Clone)]
pub struct TokenSplitter {
    max_tokens: usize,
    overlap_tokens: usize,
}

impl TokenSplitter {
    /// Create a splitter with the given budget and overlap window.
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            max_tokens,
            overlap_tokens,
        }
    }

    fn count(&self, counter: &dyn TokenCounter, text: &str) -> usize {
        match counter.count(text) {
            Ok(count) => count,
            Err(err) => {
                warn!(%err, "token counter failed, using local estimate");
                ApproxTokenCounter.count_infallible(text)
            }
        }
    }

    /// Split `text` into chunks of at most `max_tokens` tokens.
    ///
    /// Guarantees:
    /// - every input line appears intact in at least one chunk;
    /// - concatenating the chunks minus the duplicated overlap lines
    ///   reconstructs the input line sequence;
    /// - only a chunk holding a single line that alone exceeds the budget
    ///   may be oversized - line integrity wins over strict compliance.
    ///
    /// Counter failures are recovered internally; splitting never fails.
    pub fn split(&self, text: &str, counter: &dyn TokenCounter) -> Vec<Chunk> {
        let total = self.count(counter, text);
        if total <= self.max_tokens {
            return vec![Chunk {
                text: text.to_string(),
                token_count: total,
            }];
        }

        let mut chunks: Vec<Chunk> = Vec::new();
        // Lines of the chunk being built, each with its token count.
        let mut current: Vec<(String, usize)> = Vec::new();
        let mut current_tokens = 0usize;

        for line in text.split('\n') {
            let line = format!("{line}\n");
            let line_tokens = self.count(counter, &line);

            // An indivisible oversized line becomes its own chunk.
            if line_tokens > self.max_tokens {
                if !current.is_empty() {
                    chunks.push(close_chunk(&current, current_tokens));
                    current.clear();
                    current_tokens = 0;
                }
                chunks.push(Chunk {
                    text: line,
                    token_count: line_tokens,
                });
                continue;
            }

            if current_tokens + line_tokens > self.max_tokens {
                chunks.push(close_chunk(&current, current_tokens));

                // Seed the next chunk with the tail of the one just
                // closed: whole lines only, walked newest-first until the
                // overlap window is spent.
                let mut overlap: Vec<(String, usize)> = Vec::new();
                let mut overlap_tokens = 0usize;
                for (prev_line, prev_tokens) in current.iter().rev() {
                    if overlap_tokens + prev_tokens > self.overlap_tokens {
                        break;
                    }
                    overlap.insert(0, (prev_line.clone(), *prev_tokens));
                    overlap_tokens += prev_tokens;
                }

                current = overlap;
                current.push((line, line_tokens));
                current_tokens = overlap_tokens + line_tokens;
            } else {
                current.push((line, line_tokens));
                current_tokens += line_tokens;
            }
        }

        if !current.is_empty() {
            chunks.push(close_chunk(&current, current_tokens));
        }
        chunks
    }
}

fn close_chunk(lines: &[(String, usize)], token_count: usize) -> Chunk {
    Chunk {
        text: lines.iter().map(|(line, _)| line.as_str()).collect(),
        token_count,
    }
}
