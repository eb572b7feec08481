//! Document extraction: URL in, [`ArticleRecord`] out.
//!
//! Extraction follows a two-phase pattern:
//!
//! 1. **Fetching**: Download the page over HTTP ([`article`])
//! 2. **Parsing**: Pull title, author, date, body, and keyword hints out of
//!    the HTML ([`metadata`])
//!
//! Fields that cannot be determined are reported as the `"not_found"`
//! sentinel rather than as an error. Only transport failures, non-success
//! status codes and unusable URLs are errors.

pub mod article;
pub mod metadata;

use crate::error::DigestError;
use crate::models::ArticleRecord;

pub use article::WebExtractor;

/// Turns a URL into raw article fields.
pub trait ArticleExtractor {
    async fn extract(&self, url: &str) -> Result<ArticleRecord, DigestError>;
}
