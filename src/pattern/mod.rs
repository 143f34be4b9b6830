//! Format-string extraction and regex compilation.
//!
//! The scanning stage yields whole call statements; this module pulls the
//! quoted format string out of each statement and compiles it into a
//! regex that matches the rendered runtime log line.

pub mod compiler;
pub mod literal;

pub use compiler::compile;
pub use literal::{extract_literal, is_noise, tidy};
