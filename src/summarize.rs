//! Abstractive summarization of English text.
//!
//! The backend owns its generation bounds (minimum and maximum summary
//! length in tokens, beam width). Inputs shorter than the minimum still
//! produce a summary of at least the minimum length; the model pads the
//! generation rather than failing.

use crate::error::DigestError;

/// Produces a bounded-length abstractive summary of English text.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> Result<String, DigestError>;
}
