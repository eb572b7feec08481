//! Marian sequence-to-sequence translation (`opus-mt-mul-en`).

use super::model_file;
use crate::config::TranslationSettings;
use crate::error::DigestError;
use crate::translation::SentenceTranslator;
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::translation::{Language, TranslationConfig, TranslationModel};
use rust_bert::resources::LocalResource;
use std::path::Path;
use tch::Device;
use tracing::{info, instrument};

/// Source languages accepted by the configuration. The multilingual model
/// needs no source prefix, so units are translated without naming one.
const SOURCE_LANGUAGES: &[Language] = &[
    Language::French,
    Language::German,
    Language::Spanish,
    Language::Italian,
    Language::Portuguese,
    Language::Dutch,
    Language::Russian,
    Language::Polish,
    Language::Swedish,
    Language::Turkish,
    Language::Arabic,
    Language::Japanese,
    Language::Korean,
    Language::Hindi,
    Language::Romanian,
    Language::Czech,
    Language::Danish,
    Language::Finnish,
    Language::Greek,
    Language::Hungarian,
    Language::Ukrainian,
    Language::Vietnamese,
    Language::Indonesian,
];

pub struct MarianTranslator {
    model: TranslationModel,
}

impl MarianTranslator {
    /// Load the model stored in `dir`.
    #[instrument(level = "info", skip(settings))]
    pub fn load(model: &str, dir: &Path, settings: &TranslationSettings) -> Result<Self, DigestError> {
        let weights = model_file(model, dir, "rust_model.ot")?;
        let config_json = model_file(model, dir, "config.json")?;
        let vocab = model_file(model, dir, "vocab.json")?;
        let spm = model_file(model, dir, "source.spm")?;

        let mut config = TranslationConfig::new(
            ModelType::Marian,
            ModelResource::Torch(Box::new(LocalResource::from(weights))),
            LocalResource::from(config_json),
            LocalResource::from(vocab),
            Some(LocalResource::from(spm)),
            SOURCE_LANGUAGES,
            [Language::English],
            Device::cuda_if_available(),
        );
        config.num_beams = settings.num_beams;
        config.early_stopping = settings.early_stopping;
        config.do_sample = false;

        let model_handle =
            TranslationModel::new(config).map_err(|e| DigestError::model_load(model, dir, e))?;
        info!("Translation model ready");
        Ok(Self { model: model_handle })
    }
}

impl SentenceTranslator for MarianTranslator {
    fn translate_unit(&self, unit: &str, _source_lang: &str) -> Result<String, DigestError> {
        // Over-long inputs are truncated by the tokenizer (longest-first).
        let mut output = self
            .model
            .translate(&[unit], Option::<Language>::None, Language::English)
            .map_err(|e| DigestError::Translation(e.to_string()))?;
        output
            .pop()
            .ok_or_else(|| DigestError::Translation("model returned no output".to_string()))
    }
}
