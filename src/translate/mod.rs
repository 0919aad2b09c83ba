//! Translation service
//!
//! `Translator` abstracts the external provider; `GoogleTranslator` is the
//! production implementation. `TranslationService` runs the recording
//! pipeline: validate, translate, then append to the history log. History
//! failures never surface to the caller; provider failures skip the log.

mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;
use std::sync::Arc;

use crate::db::schemas::HistoryDoc;
use crate::history::HistorySink;
use crate::types::{LatinitasError, Result};

/// External translation capability
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target`, returning the translated text
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Result of one translation request
#[derive(Debug, Clone)]
pub struct Translated {
    pub translation: String,
    pub original: String,
    pub source: String,
    pub target: String,
}

/// Orchestrates the external translator and the history log
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    history: Arc<dyn HistorySink>,
}

impl TranslationService {
    pub fn new(translator: Arc<dyn Translator>, history: Arc<dyn HistorySink>) -> Self {
        Self {
            translator,
            history,
        }
    }

    /// Translate and record
    ///
    /// 1. Empty text fails with `InvalidInput` before any external call.
    /// 2. Provider failure propagates with the provider's message; nothing
    ///    is written to the history log.
    /// 3. On success the entry is appended (`user_id` defaults to
    ///    "anonymous"); append failures are handled inside the sink and
    ///    the translation is returned regardless.
    pub async fn record_translation(
        &self,
        user_id: Option<&str>,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translated> {
        if text.is_empty() {
            return Err(LatinitasError::InvalidInput { field: "text" });
        }

        let translation = self.translator.translate(text, source, target).await?;

        let entry = HistoryDoc::new(user_id.unwrap_or("anonymous"), text, &translation);
        self.history.append(entry).await;

        Ok(Translated {
            translation,
            original: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    struct FixedTranslator(std::result::Result<String, String>);

    #[async_trait]
    impl Translator for FixedTranslator {
        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(m) => Err(LatinitasError::Translation(m.clone())),
            }
        }
    }

    struct KeylessTranslator;

    #[async_trait]
    impl Translator for KeylessTranslator {
        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            Err(LatinitasError::MissingApiKey)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<HistoryDoc>>,
    }

    #[async_trait]
    impl HistorySink for RecordingSink {
        async fn append(&self, entry: HistoryDoc) {
            self.entries.lock().await.push(entry);
        }
    }

    /// Sink whose underlying write always fails; the failure is logged
    /// and swallowed, as HistoryLog does for a lost MongoDB connection
    #[derive(Default)]
    struct BrokenSink {
        attempts: Mutex<u32>,
    }

    #[async_trait]
    impl HistorySink for BrokenSink {
        async fn append(&self, entry: HistoryDoc) {
            *self.attempts.lock().await += 1;
            let write: std::result::Result<(), &str> = Err("connection reset");
            if let Err(e) = write {
                tracing::error!(user_id = %entry.user_id, "Failed to append translation history entry: {}", e);
            }
        }
    }

    fn service(
        translator: impl Translator + 'static,
    ) -> (TranslationService, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let service = TranslationService::new(Arc::new(translator), sink.clone());
        (service, sink)
    }

    #[tokio::test]
    async fn test_success_records_and_returns() {
        let (service, sink) = service(FixedTranslator(Ok("puella".to_string())));

        let result = service
            .record_translation(Some("u1"), "girl", "en", "la")
            .await
            .unwrap();

        assert_eq!(result.translation, "puella");
        assert_eq!(result.original, "girl");
        assert_eq!(result.source, "en");
        assert_eq!(result.target, "la");

        let entries = sink.entries.lock().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, "u1");
        assert_eq!(entries[0].source_text, "girl");
        assert_eq!(entries[0].translated_text, "puella");
    }

    #[tokio::test]
    async fn test_history_append_failure_never_fails_translation() {
        let sink = Arc::new(BrokenSink::default());
        let service = TranslationService::new(
            Arc::new(FixedTranslator(Ok("puella".to_string()))),
            sink.clone(),
        );

        let result = service
            .record_translation(Some("u1"), "girl", "en", "la")
            .await
            .unwrap();

        // The translation is returned even though the log write failed
        assert_eq!(result.translation, "puella");
        assert_eq!(*sink.attempts.lock().await, 1);
    }

    #[tokio::test]
    async fn test_missing_user_defaults_to_anonymous() {
        let (service, sink) = service(FixedTranslator(Ok("puer".to_string())));

        service
            .record_translation(None, "boy", "en", "la")
            .await
            .unwrap();

        let entries = sink.entries.lock().await;
        assert_eq!(entries[0].user_id, "anonymous");
    }

    #[tokio::test]
    async fn test_empty_text_rejected_with_no_append() {
        let (service, sink) = service(FixedTranslator(Ok("puella".to_string())));

        let err = service
            .record_translation(Some("u1"), "", "la", "en")
            .await
            .unwrap_err();

        assert!(matches!(err, LatinitasError::InvalidInput { field: "text" }));
        assert!(sink.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_skips_history() {
        let (service, sink) = service(FixedTranslator(Err("quota exceeded".to_string())));

        let err = service
            .record_translation(Some("u1"), "girl", "en", "la")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Translation failed: quota exceeded");
        assert!(sink.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_deterministic_and_skips_history() {
        let (service, sink) = service(KeylessTranslator);

        let err = service
            .record_translation(Some("u1"), "girl", "en", "la")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API key not configured");
        assert!(sink.entries.lock().await.is_empty());
    }
}
