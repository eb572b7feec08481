//! Local model backends and the context that owns them.
//!
//! Models are loaded exactly once, at process start, into a
//! [`ModelContext`]. The orchestrator owns the context and only ever uses it
//! read-only. [`load_models`] is the single initialization failure path:
//! when it fails the process reports the error and exits before any request
//! is processed.
//!
//! # Feature Flag
//!
//! The `rust-bert` backends need libtorch and are compiled only with
//! `cargo build --features models`. Without the feature, [`load_models`]
//! always fails with an explanatory message.
//!
//! # Filesystem Layout
//!
//! ```text
//! ~/.models/
//! ├── Helsinki-NLP__opus-mt-mul-en/   rust_model.ot config.json vocab.json source.spm
//! └── facebook__bart-large-cnn/       rust_model.ot config.json vocab.json merges.txt
//! ```

#[cfg(feature = "models")]
mod bart;
#[cfg(feature = "models")]
mod keybert;
#[cfg(feature = "models")]
mod marian;

use crate::config::DigestConfig;
use crate::error::DigestError;
use crate::keywords::KeywordExtractor;
use crate::summarize::Summarizer;
use crate::translation::TranslationEngine;
use std::fmt;
#[cfg(feature = "models")]
use std::path::{Path, PathBuf};

/// Initialized model handles shared by every stage of a run.
pub struct ModelContext {
    pub translation: TranslationEngine,
    pub summarizer: Box<dyn Summarizer>,
    pub keywords: Box<dyn KeywordExtractor>,
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext").finish_non_exhaustive()
    }
}

/// Load every model named in `config`.
#[cfg(feature = "models")]
#[tracing::instrument(level = "info", skip_all, fields(models_dir = %config.models_dir.display()))]
pub fn load_models(config: &DigestConfig) -> Result<ModelContext, DigestError> {
    let t0 = std::time::Instant::now();

    let translator = marian::MarianTranslator::load(
        &config.translation_model,
        &config.model_path(&config.translation_model),
        &config.translation,
    )?;
    let summarizer = bart::BartSummarizer::load(
        &config.summarization_model,
        &config.model_path(&config.summarization_model),
        &config.summarization,
    )?;
    let keywords = keybert::KeyBertExtractor::load()?;

    tracing::info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Models loaded"
    );
    Ok(ModelContext {
        translation: TranslationEngine::new(Box::new(translator)),
        summarizer: Box::new(summarizer),
        keywords: Box::new(keywords),
    })
}

/// Load every model named in `config`.
#[cfg(not(feature = "models"))]
pub fn load_models(config: &DigestConfig) -> Result<ModelContext, DigestError> {
    Err(DigestError::model_load(
        &config.translation_model,
        config.model_path(&config.translation_model),
        "model backends are not compiled in; rebuild with `--features models`",
    ))
}

/// Resolve `file` inside a model directory, failing fast when absent.
#[cfg(feature = "models")]
fn model_file(model: &str, dir: &Path, file: &str) -> Result<PathBuf, DigestError> {
    if !dir.is_dir() {
        return Err(DigestError::model_load(model, dir, "model directory does not exist"));
    }
    let path = dir.join(file);
    if !path.is_file() {
        return Err(DigestError::model_load(model, dir, format!("missing {file}")));
    }
    Ok(path)
}
