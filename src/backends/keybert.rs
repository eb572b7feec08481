//! Embedding-based keyword extraction in the KeyBERT style.
//!
//! Candidate words are embedded with a sentence-embeddings model and ranked
//! by cosine similarity to the whole document. English stop words are
//! excluded by the default tokenizer configuration. The embeddings model is
//! resolved through rust-bert's own resource cache.

use crate::error::DigestError;
use crate::keywords::{CANDIDATE_COUNT, KeywordExtractor};
use rust_bert::pipelines::keywords_extraction::{KeywordExtractionConfig, KeywordExtractionModel};
use tracing::{info, instrument};

const EMBEDDINGS_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

pub struct KeyBertExtractor {
    model: KeywordExtractionModel<'static>,
}

impl KeyBertExtractor {
    #[instrument(level = "info")]
    pub fn load() -> Result<Self, DigestError> {
        let config = KeywordExtractionConfig {
            num_keywords: CANDIDATE_COUNT,
            ..Default::default()
        };
        let model = KeywordExtractionModel::new(config)
            .map_err(|e| DigestError::model_load(EMBEDDINGS_MODEL, "rustbert-cache", e))?;
        info!("Keyword model ready");
        Ok(Self { model })
    }
}

impl KeywordExtractor for KeyBertExtractor {
    fn candidates(&self, text: &str, top_n: usize) -> Result<Vec<String>, DigestError> {
        let mut predictions = self
            .model
            .predict(&[text])
            .map_err(|e| DigestError::Keywords(e.to_string()))?;
        let keywords = predictions.pop().unwrap_or_default();
        Ok(keywords.into_iter().take(top_n).map(|k| k.text).collect())
    }
}
