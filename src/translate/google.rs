//! Google Translate provider

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::translate::Translator;
use crate::types::{LatinitasError, Result};

/// Google Cloud Translation v2 client
///
/// Constructed once at startup; a missing API key is detected per call so
/// the service starts (and degrades deterministically) without credentials.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<TranslationItem>,
}

#[derive(Deserialize)]
struct TranslationItem {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LatinitasError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        if api_key.is_none() {
            warn!("GOOGLE_TRANSLATE_API_KEY not set - /api/translate will return a configuration error");
        }

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(LatinitasError::MissingApiKey)?;

        debug!(source = %source, target = %target, chars = text.len(), "Calling Google Translate");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&serde_json::json!({
                "q": text,
                "source": source,
                "target": target,
                "format": "text",
            }))
            .send()
            .await
            .map_err(|e| LatinitasError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LatinitasError::Translation(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| LatinitasError::Translation(format!("unexpected provider response: {}", e)))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                LatinitasError::Translation("provider returned no translations".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_configured_timeout() {
        let translator = GoogleTranslator::new(
            "https://translation.invalid/v2".to_string(),
            Some("key".to_string()),
            Duration::from_millis(1500),
        );
        assert!(translator.is_ok());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network_call() {
        let translator = GoogleTranslator::new(
            "https://translation.invalid/v2".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        let err = translator.translate("girl", "en", "la").await.unwrap_err();
        assert!(matches!(err, LatinitasError::MissingApiKey));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"data":{"translations":[{"translatedText":"puella"}]}}"#;
        let parsed: TranslateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.translations[0].translated_text, "puella");
    }
}
