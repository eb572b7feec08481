//! Dominant-language detection for article bodies.
//!
//! Detection uses `whatlang`'s trigram model, which is deterministic: the
//! same text always yields the same code. Codes are reported as ISO-639-1
//! (`"en"`, `"fr"`) when the language has one, otherwise as ISO-639-3.

use crate::error::DigestError;
use std::fmt;
use tracing::{debug, instrument};
use whatlang::Lang;

/// Short language identifier such as `"en"` or `"de"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const ENGLISH: &'static str = "en";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_english(&self) -> bool {
        self.0 == Self::ENGLISH
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classifies the dominant language of a text blob.
pub trait LanguageDetector {
    fn detect(&self, text: &str) -> Result<LanguageCode, DigestError>;
}

/// [`LanguageDetector`] backed by `whatlang`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    #[instrument(level = "info", skip_all, fields(chars = text.len()))]
    fn detect(&self, text: &str) -> Result<LanguageCode, DigestError> {
        let info = whatlang::detect(text)
            .ok_or_else(|| DigestError::Detection("no features in text".to_string()))?;
        let code = iso_code(info.lang());
        debug!(
            %code,
            confidence = info.confidence(),
            reliable = info.is_reliable(),
            "Detected language"
        );
        Ok(code)
    }
}

/// Map a `whatlang` language onto the shortest ISO code available.
fn iso_code(lang: Lang) -> LanguageCode {
    // Individual languages of a macrolanguage carry no 639-1 code in isolang.
    match lang {
        Lang::Cmn => return LanguageCode::new("zh"),
        Lang::Pes => return LanguageCode::new("fa"),
        _ => {}
    }
    let three = lang.code();
    let code = isolang::Language::from_639_3(three)
        .and_then(|l| l.to_639_1())
        .unwrap_or(three);
    LanguageCode::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let text = "The cat sat quietly on the warm windowsill, watching the birds \
                    in the garden while the rain kept falling on the old roof.";
        let code = WhatlangDetector.detect(text).unwrap();
        assert_eq!(code.as_str(), "en");
        assert!(code.is_english());
    }

    #[test]
    fn test_detects_french() {
        let text = "Le chat est assis tranquillement sur le rebord de la fenêtre et \
                    regarde les oiseaux dans le jardin pendant que la pluie tombe.";
        let code = WhatlangDetector.detect(text).unwrap();
        assert_eq!(code.as_str(), "fr");
        assert!(!code.is_english());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let text = "Der Hund läuft schnell durch den Park und spielt mit dem Ball.";
        let first = WhatlangDetector.detect(text).unwrap();
        for _ in 0..5 {
            assert_eq!(WhatlangDetector.detect(text).unwrap(), first);
        }
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let err = WhatlangDetector.detect("").unwrap_err();
        assert!(matches!(err, DigestError::Detection(_)));
    }

    #[test]
    fn test_iso_code_mapping() {
        assert_eq!(iso_code(Lang::Eng).as_str(), "en");
        assert_eq!(iso_code(Lang::Deu).as_str(), "de");
        assert_eq!(iso_code(Lang::Cmn).as_str(), "zh");
        assert_eq!(iso_code(Lang::Pes).as_str(), "fa");
    }

    #[test]
    fn test_every_detected_language_has_two_letter_code() {
        let long: Vec<_> = Lang::all()
            .iter()
            .map(|lang| iso_code(*lang))
            .filter(|code| code.as_str().len() != 2)
            .collect();
        assert!(long.is_empty(), "no 639-1 code for {long:?}");
    }
}
