//! Data models for extracted articles and the digest result.
//!
//! This module defines the records that flow through the pipeline:
//! - [`ArticleRecord`]: Raw fields returned by the document extractor
//! - [`Digest`]: The assembled success payload
//! - [`ResultRecord`]: The single JSON object emitted per invocation
//! - [`Keywords`]: Ordered keyword list serialized as `keyword_<i>` entries

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Placeholder used for any article field the extractor could not determine.
pub const NOT_FOUND: &str = "not_found";

/// Substituted for the translated title when the title backend gave nothing useful.
pub const TRANSLATION_UNAVAILABLE: &str = "Translation not available.";

/// An article as returned by the document extractor.
///
/// Every string field holds [`NOT_FOUND`] rather than being optional, which
/// keeps the output shape identical whether or not a field was present in
/// the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Headline of the article.
    pub title: String,
    /// First credited author.
    pub author: String,
    /// Publish date as written in the page metadata.
    pub date: String,
    /// Cleaned main text, paragraphs separated by blank lines.
    pub body: String,
    /// Keywords the page declares about itself, in document order.
    pub keyword_hints: Vec<String>,
}

impl Default for ArticleRecord {
    fn default() -> Self {
        Self {
            title: NOT_FOUND.to_string(),
            author: NOT_FOUND.to_string(),
            date: NOT_FOUND.to_string(),
            body: NOT_FOUND.to_string(),
            keyword_hints: Vec::new(),
        }
    }
}

impl ArticleRecord {
    /// Whether the extractor failed to locate a body.
    pub fn body_missing(&self) -> bool {
        self.body == NOT_FOUND
    }
}

/// Ordered keyword list.
///
/// Serializes as a JSON object `{"keyword_1": .., "keyword_2": ..}` keeping
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords(pub Vec<String>);

impl Serialize for Keywords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, keyword) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("keyword_{}", i + 1), keyword)?;
        }
        map.end()
    }
}

/// The success payload of a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    pub title: String,
    pub translated_title: String,
    pub author: String,
    pub date: String,
    pub keywords: Keywords,
    /// Normalized abstractive summary.
    pub text: String,
}

/// The one JSON object written per invocation.
///
/// Exactly one of the two shapes is ever produced:
///
/// ```text
/// {"status": "ok", "title": .., "translated_title": .., "author": .., "date": .., "keywords": {..}, "text": ..}
/// {"status": "error", "error": ..}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultRecord {
    Ok(Digest),
    Error { error: String },
}

impl ResultRecord {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}
