//! Batching and wire format for the downstream log classifier.
//!
//! The classifier itself (a model behind a network or CLI boundary) lives
//! outside this crate, behind [`ClassifyBackend`]. What lives here is the
//! in-scope half of that contract: grouping lines into token-limited
//! batches, rendering the fixed instruction prompt, and parsing the
//! `SUSPICIOUS_ID: <id> | REASON: <text>` lines out of the reply.

use crate::tokens::{ApproxTokenCounter, TokenCounter};
use thiserror::Error;
use tracing::warn;

/// Default token budget for one classifier batch, leaving room for the
/// instruction prompt and the expected reply.
pub const DEFAULT_BATCH_TOKEN_LIMIT: usize = 512;

/// Per-line token allowance for the `ID:<id> | LOG:` framing.
pub const LINE_OVERHEAD_TOKENS: usize = 10;

/// One line queued for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// 1-based position among the non-empty input lines.
    pub id: usize,
    pub line: String,
}

/// A token-limited group of lines sent to the classifier in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub items: Vec<BatchItem>,
    /// Token total of the raw lines, framing overhead excluded.
    pub token_count: usize,
}

/// Groups input lines into batches under a token limit.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    token_limit: usize,
    line_overhead: usize,
}

impl BatchBuilder {
    pub fn new(token_limit: usize) -> Self {
        Self {
            token_limit,
            line_overhead: LINE_OVERHEAD_TOKENS,
        }
    }

    /// Assign IDs to the non-empty lines and group them so that each
    /// batch stays under the token limit (framing overhead included).
    /// A counter failure downgrades that line to the local estimate.
    pub fn build<I, S>(&self, lines: I, counter: &dyn TokenCounter) -> Vec<Batch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batches = Vec::new();
        let mut items: Vec<BatchItem> = Vec::new();
        let mut tokens = 0usize;
        let mut next_id = 1usize;

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let line_tokens = match counter.count(line) {
                Ok(count) => count,
                Err(err) => {
                    warn!(%err, "token counter failed, using local estimate");
                    ApproxTokenCounter.count_infallible(line)
                }
            };

            if !items.is_empty()
                && tokens + line_tokens + self.line_overhead > self.token_limit
            {
                batches.push(Batch {
                    items: std::mem::take(&mut items),
                    token_count: tokens,
                });
                tokens = 0;
            }

            items.push(BatchItem {
                id: next_id,
                line: line.to_string(),
            });
            next_id += 1;
            tokens += line_tokens;
        }

        if !items.is_empty() {
            batches.push(Batch {
                items,
                token_count: tokens,
            });
        }
        batches
    }
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_TOKEN_LIMIT)
    }
}

/// Render the fixed instruction prompt for one batch.
pub fn build_classify_prompt(batch: &Batch) -> String {
    const TEMPLATE: &str = include_str!("prompts/classify.txt");

    let rows = batch
        .items
        .iter()
        .map(|item| format!("ID:{} | LOG:{}", item.id, item.line))
        .collect::<Vec<_>>()
        .join("\n");

    TEMPLATE.replace("{log_lines}", &rows)
}

/// A classifier verdict for one batched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspicion {
    pub id: usize,
    pub reason: String,
}

/// Parse the collaborator's free-text reply.
///
/// Accepts any mix of noise and `SUSPICIOUS_ID: <id> | REASON: <text>`
/// lines; the literal `NONE` (or an empty reply) yields no suspicions.
/// Lines with an unparseable ID are dropped, a missing reason becomes
/// "Unknown".
pub fn parse_response(response: &str) -> Vec<Suspicion> {
    let mut suspicions = Vec::new();
    for line in response.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("SUSPICIOUS_ID:") else {
            continue;
        };
        let (id_part, reason) = match rest.split_once('|') {
            Some((id, tail)) => (id.trim(), tail.replace("REASON:", "").trim().to_string()),
            None => (rest.trim(), String::new()),
        };
        let Ok(id) = id_part.parse::<usize>() else {
            continue;
        };
        let reason = if reason.is_empty() {
            "Unknown".to_string()
        } else {
            reason
        };
        suspicions.push(Suspicion { id, reason });
    }
    suspicions
}

/// Errors from classifier collaborators.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier failed after {attempts} attempts: {message}")]
    Failed { attempts: u32, message: String },
}

/// Strategy seam for the external classifier.
///
/// Implementations are network- or process-bound and must be thread-safe;
/// none ships in this crate.
pub trait ClassifyBackend: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Send one rendered prompt, return the raw free-text reply.
    fn classify(&self, prompt: &str) -> Result<String, ClassifyError>;
}

/// Run every batch through the backend and collect suspicious lines,
/// resolved back to their original text.
///
/// A failed batch is logged and skipped; one bad batch never aborts the
/// run.
pub fn classify_batches(
    backend: &dyn ClassifyBackend,
    batches: &[Batch],
) -> Vec<(Suspicion, String)> {
    let mut results = Vec::new();
    for (index, batch) in batches.iter().enumerate() {
        let prompt = build_classify_prompt(batch);
        let response = match backend.classify(&prompt) {
            Ok(response) => response,
            Err(err) => {
                warn!(batch = index, backend = backend.name(), %err, "batch skipped");
                continue;
            }
        };
        for suspicion in parse_response(&response) {
            if let Some(item) = batch.items.iter().find(|item| item.id == suspicion.id) {
                results.push((suspicion, item.line.clone()));
            }
        }
    }
    results
}
