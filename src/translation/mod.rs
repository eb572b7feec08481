//! Sentence-chunked translation into English.
//!
//! Long bodies are never sent to the model in one piece. The text is split
//! into sentence-like [units](split_sentences), each unit is translated on
//! its own, and the results are re-joined with single spaces in the original
//! order. A malformed sentence therefore only affects its own unit.
//!
//! # Submodules
//!
//! - [`title`]: Independent web-service path used for article titles

pub mod title;

use crate::error::DigestError;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Sentence terminator followed by whitespace; the split point is after the
/// terminator so punctuation stays with its sentence.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Translates a single unit of text into English.
///
/// Implementations decode with beam search and truncate inputs longer than
/// the model accepts instead of failing.
pub trait SentenceTranslator {
    fn translate_unit(&self, unit: &str, source_lang: &str) -> Result<String, DigestError>;
}

/// Partition `text` into translation units.
///
/// A unit ends right after `.`, `!` or `?` when whitespace follows, so no
/// unit ever spans a terminator. Units are trimmed and blank ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // The terminator is one ASCII byte.
        let end = boundary.start() + 1;
        units.push(&text[start..end]);
        start = boundary.end();
    }
    units.push(&text[start..]);

    units
        .into_iter()
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .collect()
}

/// Chunked translation engine over a [`SentenceTranslator`] backend.
pub struct TranslationEngine {
    backend: Box<dyn SentenceTranslator>,
}

impl TranslationEngine {
    pub fn new(backend: Box<dyn SentenceTranslator>) -> Self {
        Self { backend }
    }

    /// Translate `text` from `source_lang` into English, one unit at a time.
    #[instrument(level = "info", skip_all, fields(%source_lang, chars = text.len()))]
    pub fn translate(&self, text: &str, source_lang: &str) -> Result<String, DigestError> {
        let t0 = Instant::now();
        let units = split_sentences(text);

        let mut translated = Vec::with_capacity(units.len());
        for (index, unit) in units.iter().enumerate() {
            let output = self.backend.translate_unit(unit, source_lang)?;
            debug!(
                index,
                unit = %truncate_for_log(unit, 80),
                output = %truncate_for_log(&output, 80),
                "Translated unit"
            );
            translated.push(output);
        }

        info!(
            units = units.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Translated text"
        );
        Ok(translated.join(" "))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Test backend that upper-cases each unit and records what it saw.
    #[derive(Default, Clone)]
    pub(crate) struct RecordingTranslator {
        pub(crate) seen: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl SentenceTranslator for RecordingTranslator {
        fn translate_unit(&self, unit: &str, source_lang: &str) -> Result<String, DigestError> {
            self.seen
                .borrow_mut()
                .push((unit.to_string(), source_lang.to_string()));
            Ok(unit.to_uppercase())
        }
    }

    struct FailingOn(&'static str);

    impl SentenceTranslator for FailingOn {
        fn translate_unit(&self, unit: &str, _source_lang: &str) -> Result<String, DigestError> {
            if unit.contains(self.0) {
                Err(DigestError::Translation(format!("cannot translate {unit:?}")))
            } else {
                Ok(unit.to_string())
            }
        }
    }

    #[test]
    fn test_split_on_terminators() {
        let units = split_sentences("Bonjour. Comment ça va? Très bien!  Merci");
        assert_eq!(units, vec!["Bonjour.", "Comment ça va?", "Très bien!", "Merci"]);
    }

    #[test]
    fn test_split_requires_following_whitespace() {
        let units = split_sentences("Version 2.5 est sortie.Le site example.com aussi.");
        assert_eq!(units, vec!["Version 2.5 est sortie.Le site example.com aussi."]);
    }

    #[test]
    fn test_split_on_newlines_and_paragraphs() {
        let units = split_sentences("Premier paragraphe.\n\nDeuxième paragraphe!\nFin");
        assert_eq!(units, vec!["Premier paragraphe.", "Deuxième paragraphe!", "Fin"]);
    }

    #[test]
    fn test_split_blank_text() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_translate_preserves_order() {
        let backend = RecordingTranslator::default();
        let seen = backend.seen.clone();
        let engine = TranslationEngine::new(Box::new(backend));

        let out = engine.translate("Un. Deux! Trois? Quatre", "fr").unwrap();
        assert_eq!(out, "UN. DEUX! TROIS? QUATRE");

        let seen = seen.borrow();
        let units: Vec<&str> = seen.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(units, vec!["Un.", "Deux!", "Trois?", "Quatre"]);
        assert!(seen.iter().all(|(_, lang)| lang == "fr"));
    }

    #[test]
    fn test_resplit_keeps_relative_order() {
        let engine = TranslationEngine::new(Box::new(RecordingTranslator::default()));
        let input = "Alpha eins. Beta zwei! Gamma drei? Delta vier.";
        let out = engine.translate(input, "de").unwrap();

        let expected: Vec<String> = split_sentences(input)
            .into_iter()
            .map(str::to_uppercase)
            .collect();
        assert_eq!(split_sentences(&out), expected);
    }

    #[test]
    fn test_translate_empty_text() {
        let backend = RecordingTranslator::default();
        let seen = backend.seen.clone();
        let engine = TranslationEngine::new(Box::new(backend));
        assert_eq!(engine.translate("", "fr").unwrap(), "");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unit_failure_propagates() {
        let engine = TranslationEngine::new(Box::new(FailingOn("cassé")));
        let err = engine.translate("Tout va bien. Ceci est cassé. Fin.", "fr").unwrap_err();
        assert!(err.to_string().contains("cassé"));
    }
}
