//! Translation endpoints
//!
//! - POST /api/translate - proxy the translation provider and record history
//! - GET /api/translations/{userId} - up to 50 entries, newest first

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::db::schemas::HistoryDoc;
use crate::routes::{bad_request, error_response, json_response};
use crate::server::AppState;

fn default_source() -> String {
    "en".to_string()
}

fn default_target() -> String {
    "la".to_string()
}

/// POST /api/translate request body
#[derive(Deserialize, Debug)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// POST /api/translate response body
#[derive(Serialize, Debug)]
pub struct TranslateResponse {
    pub translation: String,
    pub original: String,
    pub source: String,
    pub target: String,
}

/// History entry as returned on the wire
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub user_id: String,
    pub source_text: String,
    pub translated_text: String,
    pub timestamp: String,
}

impl From<HistoryDoc> for HistoryEntryResponse {
    fn from(doc: HistoryDoc) -> Self {
        Self {
            user_id: doc.user_id,
            source_text: doc.source_text,
            translated_text: doc.translated_text,
            timestamp: doc.timestamp.to_chrono().to_rfc3339(),
        }
    }
}

/// Handle POST /api/translate
pub async fn handle_translate(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Translate request body error: {}", e);
            return bad_request("Failed to read request body");
        }
    };

    let request: TranslateRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!("Translate JSON parse error: {}", e);
            return bad_request(&format!("Invalid JSON: {}", e));
        }
    };

    let text = request.text.as_deref().unwrap_or("");
    if text.is_empty() {
        return bad_request("Text is required");
    }

    let result = state
        .translation
        .record_translation(
            request.user_id.as_deref(),
            text,
            &request.source,
            &request.target,
        )
        .await;

    match result {
        Ok(translated) => json_response(
            StatusCode::OK,
            &TranslateResponse {
                translation: translated.translation,
                original: translated.original,
                source: translated.source,
                target: translated.target,
            },
        ),
        Err(e) => error_response(&e, "Translation failed"),
    }
}

/// Handle GET /api/translations/{userId}
pub async fn handle_get_history(state: Arc<AppState>, user_id: &str) -> Response<Full<Bytes>> {
    if user_id.is_empty() {
        return bad_request("userId is required");
    }

    match state
        .history
        .list_by_user(user_id, state.args.history_limit)
        .await
    {
        Ok(entries) => {
            let response: Vec<HistoryEntryResponse> =
                entries.into_iter().map(HistoryEntryResponse::from).collect();
            json_response(StatusCode::OK, &response)
        }
        Err(e) => error_response(&e, "Failed to fetch translation history"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: TranslateRequest = serde_json::from_str(r#"{"text":"girl"}"#).unwrap();

        assert_eq!(request.text.as_deref(), Some("girl"));
        assert_eq!(request.source, "en");
        assert_eq!(request.target, "la");
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_request_explicit_languages() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text":"puella","source":"la","target":"en","userId":"u1"}"#)
                .unwrap();

        assert_eq!(request.source, "la");
        assert_eq!(request.target, "en");
        assert_eq!(request.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_history_entry_serializes_camel_case() {
        let entry = HistoryDoc::new("u1", "girl", "puella");
        let json = serde_json::to_value(HistoryEntryResponse::from(entry)).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["sourceText"], "girl");
        assert_eq!(json["translatedText"], "puella");
        assert!(json["timestamp"].is_string());
    }
}
