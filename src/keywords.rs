//! Keyword extraction and merging with extractor hints.
//!
//! The backend ranks candidate keywords by relevance (English stop words
//! excluded). Candidates are then merged with the hint keywords the page
//! declares about itself:
//!
//! 1. hints first, in document order
//! 2. then candidates, in rank order
//! 3. exact duplicates (case-sensitive) dropped, first occurrence wins
//! 4. truncated to [`KEYWORD_LIMIT`]

use crate::error::DigestError;
use itertools::Itertools;
use tracing::{debug, instrument};

/// Maximum number of keywords in a digest.
pub const KEYWORD_LIMIT: usize = 5;

/// Number of candidates requested from the backend.
pub const CANDIDATE_COUNT: usize = 5;

/// Ranks salient keywords of an English text.
pub trait KeywordExtractor {
    /// Return up to `top_n` keywords, most relevant first.
    fn candidates(&self, text: &str, top_n: usize) -> Result<Vec<String>, DigestError>;
}

/// Extract keywords from `text` and merge them with `hints`.
#[instrument(level = "info", skip_all, fields(hints = hints.len()))]
pub fn extract_keywords(
    extractor: &dyn KeywordExtractor,
    text: &str,
    hints: &[String],
) -> Result<Vec<String>, DigestError> {
    let candidates = extractor.candidates(text, CANDIDATE_COUNT)?;
    debug!(?candidates, "Keyword candidates");
    Ok(merge_keywords(hints, &candidates))
}

/// Deterministic union of `hints` and `candidates`, at most [`KEYWORD_LIMIT`] long.
pub fn merge_keywords(hints: &[String], candidates: &[String]) -> Vec<String> {
    hints
        .iter()
        .chain(candidates)
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .unique()
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Test backend returning a fixed ranked list.
    pub(crate) struct FixedCandidates(pub(crate) Vec<String>);

    impl KeywordExtractor for FixedCandidates {
        fn candidates(&self, _text: &str, top_n: usize) -> Result<Vec<String>, DigestError> {
            Ok(self.0.iter().take(top_n).cloned().collect())
        }
    }

    #[test]
    fn test_merge_hints_and_candidates() {
        let merged = merge_keywords(&strings(&["ai", "ml"]), &strings(&["ml", "future"]));
        assert_eq!(merged, strings(&["ai", "ml", "future"]));
    }

    #[test]
    fn test_merge_truncates_to_limit() {
        let merged = merge_keywords(
            &strings(&["a", "b", "c", "d"]),
            &strings(&["e", "f", "g"]),
        );
        assert_eq!(merged, strings(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let merged = merge_keywords(&strings(&["AI"]), &strings(&["ai", "AI"]));
        assert_eq!(merged, strings(&["AI", "ai"]));
    }

    #[test]
    fn test_merge_drops_duplicate_hints_and_blanks() {
        let merged = merge_keywords(&strings(&["cats", "cats", " "]), &strings(&["", "dogs"]));
        assert_eq!(merged, strings(&["cats", "dogs"]));
    }

    #[test]
    fn test_merge_is_subset_without_duplicates() {
        let cases = [
            (vec![], vec![]),
            (vec!["x"], vec![]),
            (vec![], vec!["y", "y"]),
            (vec!["a", "b", "c"], vec!["c", "b", "a", "d", "e", "f"]),
            (vec!["p", "q", "r", "s", "t", "u"], vec!["v"]),
        ];
        for (hints, candidates) in cases {
            let hints = strings(&hints);
            let candidates = strings(&candidates);
            let merged = merge_keywords(&hints, &candidates);

            assert!(merged.len() <= KEYWORD_LIMIT);
            assert_eq!(merged.iter().unique().count(), merged.len());
            assert!(merged.iter().all(|k| hints.contains(k) || candidates.contains(k)));
        }
    }

    #[test]
    fn test_extract_keywords_uses_backend() {
        let backend = FixedCandidates(strings(&["ml", "future", "robots", "data", "ethics", "extra"]));
        let keywords = extract_keywords(&backend, "text", &strings(&["ai"])).unwrap();
        assert_eq!(keywords, strings(&["ai", "ml", "future", "robots", "data"]));
    }
}
