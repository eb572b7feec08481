//! Utility functions for process setup and log formatting.
//!
//! This module provides helper functions used throughout the application:
//! - Process environment flags for the numerical backend
//! - String truncation for logging long article text

use tracing::debug;

/// Environment flags applied before any model is loaded.
///
/// They keep the tokenizer and torch runtime quiet and single-process:
/// no tokenizer thread pool, no JIT or inductor compilation, no distributed
/// subsystems, and only error-level native logging.
pub const RUNTIME_ENV: &[(&str, &str)] = &[
    ("TOKENIZERS_PARALLELISM", "false"),
    ("TORCH_INDUCTOR", "0"),
    ("TORCH_COMPILE", "0"),
    ("PYTORCH_JIT", "0"),
    ("TORCH_CPP_LOG_LEVEL", "ERROR"),
    ("PYTORCH_DISABLE_DISTRIBUTED", "1"),
];

/// Set every flag in [`RUNTIME_ENV`] unconditionally.
///
/// # Safety
///
/// Must be called while the process is still single-threaded, before the
/// model backends or any worker pool start.
pub unsafe fn apply_runtime_env() {
    for (key, value) in RUNTIME_ENV {
        // SAFETY: upheld by the caller, no other thread reads the environment yet.
        unsafe { std::env::set_var(key, value) };
    }
    debug!(count = RUNTIME_ENV.len(), "Applied runtime environment flags");
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes, on a character
/// boundary, with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
