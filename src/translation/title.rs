//! Title translation through an independent web service.
//!
//! Titles are short, so they go through a lightweight HTTP translation
//! service instead of the local Marian model. The path is designed to be
//! non-fatal: [`TitleFallback`] wraps any [`TitleTranslator`] and hands the
//! original title back whenever the backend fails.
//!
//! # Architecture
//!
//! - [`TitleTranslator`]: Core trait for an async title backend
//! - [`GoogleTitleTranslator`]: Client for the `translate_a/single` endpoint
//! - [`TitleFallback`]: Decorator that swallows backend failures

use crate::error::DigestError;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Async translation of a short string into English.
pub trait TitleTranslator {
    async fn translate_title(&self, title: &str, source_lang: &str) -> Result<String, DigestError>;
}

/// Client for the public `translate_a/single` JSON endpoint.
///
/// The response is a nested array whose first element lists translated
/// segments; each segment's first element is the translated text:
///
/// ```text
/// [[["Cats explained","Les chats expliqués",null,null,10]],null,"fr", ...]
/// ```
#[derive(Debug, Clone)]
pub struct GoogleTitleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTitleTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl TitleTranslator for GoogleTitleTranslator {
    #[instrument(level = "info", skip_all, fields(%source_lang))]
    async fn translate_title(&self, title: &str, source_lang: &str) -> Result<String, DigestError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", "en"),
                ("dt", "t"),
                ("q", title),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| DigestError::Translation(format!("title translation payload: {e}")))?;

        let translated = parse_segments(&payload).ok_or_else(|| {
            DigestError::Translation("unexpected title translation payload".to_string())
        })?;
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Title translated"
        );
        Ok(translated)
    }
}

/// Concatenate the translated segments of a `translate_a/single` payload.
fn parse_segments(payload: &Value) -> Option<String> {
    let segments = payload.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment.get(0)?.as_str()?);
    }
    Some(out)
}

/// Decorator that makes any [`TitleTranslator`] infallible.
///
/// On failure the original title is returned unchanged and a warning is
/// logged. The orchestrator is responsible for noticing that nothing was
/// translated.
pub struct TitleFallback<T> {
    inner: T,
}

impl<T> TitleFallback<T>
where
    T: TitleTranslator,
{
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    #[instrument(level = "info", skip_all, fields(%source_lang))]
    pub async fn translate_title(&self, title: &str, source_lang: &str) -> String {
        match self.inner.translate_title(title, source_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, "Title translation failed; keeping original title");
                title.to_string()
            }
        }
    }
}

impl<T> fmt::Debug for TitleFallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleFallback").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Test backend that always fails.
    pub(crate) struct BrokenTitleTranslator;

    impl TitleTranslator for BrokenTitleTranslator {
        async fn translate_title(&self, _title: &str, _source_lang: &str) -> Result<String, DigestError> {
            Err(DigestError::Translation("service unavailable".to_string()))
        }
    }

    /// Test backend returning a fixed string.
    pub(crate) struct FixedTitleTranslator(pub(crate) &'static str);

    impl TitleTranslator for FixedTitleTranslator {
        async fn translate_title(&self, _title: &str, _source_lang: &str) -> Result<String, DigestError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_parse_segments_concatenates() {
        let payload = serde_json::json!([
            [["Cats ", "Les chats ", null, null, 10], ["explained", "expliqués", null, null, 10]],
            null,
            "fr"
        ]);
        assert_eq!(parse_segments(&payload).unwrap(), "Cats explained");
    }

    #[test]
    fn test_parse_segments_rejects_garbage() {
        assert!(parse_segments(&serde_json::json!({"text": "nope"})).is_none());
        assert!(parse_segments(&serde_json::json!([[[1, 2]]])).is_none());
    }

    #[tokio::test]
    async fn test_google_translator_queries_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("sl", "fr"))
            .and(query_param("tl", "en"))
            .and(query_param("q", "Les chats expliqués"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [["Cats explained", "Les chats expliqués", null, null, 10]],
                null,
                "fr"
            ])))
            .mount(&server)
            .await;

        let translator = GoogleTitleTranslator::new(
            Client::new(),
            format!("{}/translate_a/single", server.uri()),
        );
        let out = translator
            .translate_title("Les chats expliqués", "fr")
            .await
            .unwrap();
        assert_eq!(out, "Cats explained");
    }

    #[tokio::test]
    async fn test_google_translator_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let translator = GoogleTitleTranslator::new(Client::new(), server.uri());
        let err = translator.translate_title("Hallo", "de").await.unwrap_err();
        assert!(matches!(err, DigestError::Http(_)));
    }

    #[tokio::test]
    async fn test_fallback_returns_original_on_failure() {
        let fallback = TitleFallback::new(BrokenTitleTranslator);
        assert_eq!(
            fallback.translate_title("Les chats expliqués", "fr").await,
            "Les chats expliqués"
        );
    }

    #[tokio::test]
    async fn test_fallback_passes_success_through() {
        let fallback = TitleFallback::new(FixedTitleTranslator("Cats explained"));
        assert_eq!(
            fallback.translate_title("Les chats expliqués", "fr").await,
            "Cats explained"
        );
    }

    #[tokio::test]
    async fn test_fallback_over_unreachable_service() {
        // Port 9 (discard) on localhost is not expected to speak HTTP.
        let translator = GoogleTitleTranslator::new(Client::new(), "http://127.0.0.1:9/translate");
        let fallback = TitleFallback::new(translator);
        assert_eq!(fallback.translate_title("Hola", "es").await, "Hola");
    }
}
