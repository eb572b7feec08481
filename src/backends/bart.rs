//! BART abstractive summarization (`bart-large-cnn`).

use super::model_file;
use crate::config::SummarizationSettings;
use crate::error::DigestError;
use crate::summarize::Summarizer;
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::summarization::{SummarizationConfig, SummarizationModel};
use rust_bert::resources::LocalResource;
use std::path::Path;
use std::time::Instant;
use tch::Device;
use tracing::{info, instrument};

pub struct BartSummarizer {
    model: SummarizationModel,
}

impl BartSummarizer {
    /// Load the model stored in `dir`. Inputs longer than the model's 1024
    /// positions are truncated by the tokenizer.
    #[instrument(level = "info", skip(settings))]
    pub fn load(model: &str, dir: &Path, settings: &SummarizationSettings) -> Result<Self, DigestError> {
        let weights = model_file(model, dir, "rust_model.ot")?;
        let config_json = model_file(model, dir, "config.json")?;
        let vocab = model_file(model, dir, "vocab.json")?;
        let merges = model_file(model, dir, "merges.txt")?;

        let config = SummarizationConfig {
            model_type: ModelType::Bart,
            model_resource: ModelResource::Torch(Box::new(LocalResource::from(weights))),
            config_resource: Box::new(LocalResource::from(config_json)),
            vocab_resource: Box::new(LocalResource::from(vocab)),
            merges_resource: Some(Box::new(LocalResource::from(merges))),
            min_length: settings.min_length,
            max_length: Some(settings.max_length),
            num_beams: settings.num_beams,
            early_stopping: settings.early_stopping,
            do_sample: false,
            device: Device::cuda_if_available(),
            ..Default::default()
        };

        let model_handle =
            SummarizationModel::new(config).map_err(|e| DigestError::model_load(model, dir, e))?;
        info!("Summarization model ready");
        Ok(Self { model: model_handle })
    }
}

impl Summarizer for BartSummarizer {
    #[instrument(level = "info", skip_all, fields(chars = text.len()))]
    fn summarize(&self, text: &str) -> Result<String, DigestError> {
        let t0 = Instant::now();
        let mut output = self
            .model
            .summarize(&[text])
            .map_err(|e| DigestError::Summarization(e.to_string()))?;
        let summary = output
            .pop()
            .ok_or_else(|| DigestError::Summarization("model returned no output".to_string()))?;
        info!(
            summary_chars = summary.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Summarized text"
        );
        Ok(summary)
    }
}
