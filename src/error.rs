//! Error type shared by every pipeline stage.
//!
//! Each stage returns `Result<_, DigestError>` and the orchestrator composes
//! them with `?`. The `Display` text of a [`DigestError`] is exactly what ends
//! up in the `error` field of a failure record, so messages are written for
//! the caller consuming the JSON, not for a developer reading a backtrace.

use std::path::PathBuf;

/// Everything that can go wrong while digesting an article.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// The page was fetched but no article body could be located.
    #[error("Main content not found.")]
    MainContentNotFound,

    /// Fetching or parsing the document failed.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Transport-level HTTP failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The language of the body could not be determined.
    #[error("language detection failed: {0}")]
    Detection(String),

    #[error("translation failed: {0}")]
    Translation(String),

    /// Raised by the summarization backend.
    #[cfg_attr(not(feature = "models"), allow(dead_code))]
    #[error("summarization failed: {0}")]
    Summarization(String),

    /// Raised by the keyword backend.
    #[cfg_attr(not(feature = "models"), allow(dead_code))]
    #[error("keyword extraction failed: {0}")]
    Keywords(String),

    /// A model could not be loaded from its local directory.
    #[error("{model} ({path:?}): {message}")]
    ModelLoad {
        model: String,
        path: PathBuf,
        message: String,
    },

    /// Configuration file missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DigestError {
    /// Build a model load error for `model` stored at `path`.
    pub fn model_load(
        model: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl ToString,
    ) -> Self {
        Self::ModelLoad {
            model: model.into(),
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Wrap a `std::io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_user_facing() {
        assert_eq!(
            DigestError::MainContentNotFound.to_string(),
            "Main content not found."
        );
    }

    #[test]
    fn test_stage_messages_carry_detail() {
        let err = DigestError::Translation("unit 3 exceeded buffer".to_string());
        assert_eq!(err.to_string(), "translation failed: unit 3 exceeded buffer");

        let err = DigestError::model_load("facebook/bart-large-cnn", "/tmp/m", "missing config.json");
        let msg = err.to_string();
        assert!(msg.starts_with("facebook/bart-large-cnn"));
        assert!(msg.contains("missing config.json"));
    }

    #[test]
    fn test_backend_messages() {
        assert_eq!(
            DigestError::Keywords("empty embedding".to_string()).to_string(),
            "keyword extraction failed: empty embedding"
        );
        assert_eq!(
            DigestError::Summarization("empty input".to_string()).to_string(),
            "summarization failed: empty input"
        );
    }
}
