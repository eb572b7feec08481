//! Runtime configuration.
//!
//! Everything has a default, so the YAML file is optional and may list only
//! the keys it wants to override:
//!
//! ```yaml
//! models_dir: /opt/models
//! summarization:
//!   min_length: 60
//! ```

use crate::error::DigestError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_TRANSLATION_MODEL: &str = "Helsinki-NLP/opus-mt-mul-en";
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_TITLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Top-level configuration for a digest run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Directory holding one sub-directory per model.
    pub models_dir: PathBuf,
    /// Hugging Face style identifier of the Marian translation model.
    pub translation_model: String,
    /// Hugging Face style identifier of the BART summarization model.
    pub summarization_model: String,
    /// Endpoint of the web translation service used for titles.
    pub title_endpoint: String,
    /// User agent sent when fetching articles.
    pub user_agent: String,
    pub translation: TranslationSettings,
    pub summarization: SummarizationSettings,
}

/// Generation settings for per-sentence translation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub num_beams: i64,
    pub early_stopping: bool,
}

/// Generation settings for the summarizer, lengths are in tokens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    pub min_length: i64,
    pub max_length: i64,
    pub num_beams: i64,
    pub early_stopping: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            translation_model: DEFAULT_TRANSLATION_MODEL.to_string(),
            summarization_model: DEFAULT_SUMMARIZATION_MODEL.to_string(),
            title_endpoint: DEFAULT_TITLE_ENDPOINT.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            translation: TranslationSettings::default(),
            summarization: SummarizationSettings::default(),
        }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            num_beams: 4,
            early_stopping: true,
        }
    }
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            min_length: 150,
            max_length: 400,
            num_beams: 4,
            early_stopping: true,
        }
    }
}

impl DigestConfig {
    /// Local directory for `model_id`, e.g. `facebook/bart-large-cnn`
    /// resolves to `<models_dir>/facebook__bart-large-cnn`.
    pub fn model_path(&self, model_id: &str) -> PathBuf {
        self.models_dir.join(model_dir_name(model_id))
    }
}

/// Directory name a model id is stored under.
pub fn model_dir_name(model_id: &str) -> String {
    model_id.replace('/', "__")
}

fn default_models_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".models"))
        .unwrap_or_else(|| PathBuf::from(".models"))
}

/// Load configuration from an optional YAML file.
///
/// `None` yields [`DigestConfig::default`]. A path that cannot be read or
/// parsed is an error, since the caller explicitly asked for it.
#[instrument(level = "info")]
pub fn load_config(path: Option<&Path>) -> Result<DigestConfig, DigestError> {
    let Some(path) = path else {
        return Ok(DigestConfig::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|e| DigestError::io(path, e))?;
    let config: DigestConfig = serde_yaml::from_str(&raw)
        .map_err(|e| DigestError::Config(format!("{}: {e}", path.display())))?;
    info!(models_dir = %config.models_dir.display(), "Loaded configuration");
    Ok(config)
}
