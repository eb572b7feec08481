//! The digest pipeline: one URL in, one [`ResultRecord`] out.
//!
//! Stages run strictly in order and each is gated on the previous one:
//!
//! 1. **Extraction**: fetch and parse the article
//! 2. **Detection**: identify the language of the body
//! 3. **Translation** (non-English only): title via [`TitleFallback`], body
//!    via the chunked [`TranslationEngine`](crate::translation::TranslationEngine)
//! 4. **Summarization** of the English body, then normalization
//! 5. **Keywords**: backend candidates merged with the page's hints
//! 6. **Assembly** of the success record
//!
//! Every stage returns `Result<_, DigestError>`; the first failure is turned
//! into an error record by [`Pipeline::process`], which itself never fails.
//! Title translation failures are soft: the record still has status `"ok"`.

use crate::backends::ModelContext;
use crate::error::DigestError;
use crate::keywords::extract_keywords;
use crate::language::LanguageDetector;
use crate::models::{Digest, Keywords, ResultRecord, TRANSLATION_UNAVAILABLE};
use crate::normalize::clean;
use crate::scrapers::ArticleExtractor;
use crate::translation::title::{TitleFallback, TitleTranslator};
use std::borrow::Cow;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Orchestrates the stages for one article at a time.
pub struct Pipeline<X, T> {
    extractor: X,
    detector: Box<dyn LanguageDetector>,
    title_translator: TitleFallback<T>,
    models: ModelContext,
}

impl<X, T> Pipeline<X, T>
where
    X: ArticleExtractor,
    T: TitleTranslator,
{
    pub fn new(
        extractor: X,
        detector: Box<dyn LanguageDetector>,
        title_translator: T,
        models: ModelContext,
    ) -> Self {
        Self {
            extractor,
            detector,
            title_translator: TitleFallback::new(title_translator),
            models,
        }
    }

    /// Digest `url`. Failures of any stage become an error record.
    #[instrument(level = "info", skip(self))]
    pub async fn process(&self, url: &str) -> ResultRecord {
        let t0 = Instant::now();
        match self.run(url).await {
            Ok(digest) => {
                info!(
                    keywords = digest.keywords.0.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Digest complete"
                );
                ResultRecord::Ok(digest)
            }
            Err(e) => {
                warn!(error = %e, elapsed_ms = t0.elapsed().as_millis() as u64, "Digest failed");
                ResultRecord::error(e.to_string())
            }
        }
    }

    async fn run(&self, url: &str) -> Result<Digest, DigestError> {
        let article = self.extractor.extract(url).await?;
        if article.body_missing() {
            return Err(DigestError::MainContentNotFound);
        }

        let lang = self.detector.detect(&article.body)?;
        info!(%lang, "Detected article language");

        let (translated_title, body) = if lang.is_english() {
            (article.title.clone(), Cow::Borrowed(article.body.as_str()))
        } else {
            let title = self
                .title_translator
                .translate_title(&article.title, lang.as_str())
                .await;
            // An unchanged title is taken to mean the backend did nothing,
            // even when the original happens to read the same in English.
            let title = if title.trim().is_empty() || title == article.title {
                debug!("Title translation unavailable");
                TRANSLATION_UNAVAILABLE.to_string()
            } else {
                title
            };
            let body = self
                .models
                .translation
                .translate(&article.body, lang.as_str())?;
            (title, Cow::Owned(body))
        };

        let summary = clean(&self.models.summarizer.summarize(&body)?);
        let keywords = extract_keywords(
            self.models.keywords.as_ref(),
            &body,
            &article.keyword_hints,
        )?;

        Ok(Digest {
            title: article.title,
            translated_title,
            author: article.author,
            date: article.date,
            keywords: Keywords(keywords),
            text: summary,
        })
    }
}
