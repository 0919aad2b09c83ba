//! Progress endpoints
//!
//! - GET /api/progress/{userId} - stored record or a zero-valued default,
//!   never 404; the default is not persisted
//! - POST /api/progress - apply a study delta, return the updated record

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::db::schemas::{ProgressDelta, ProgressDoc};
use crate::routes::{bad_request, error_response, json_response};
use crate::server::AppState;

/// Progress record as returned on the wire
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub user_id: String,
    pub cards_studied: i64,
    pub score: i64,
    pub study_streak: i64,
    pub mastered_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_studied: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ProgressResponse {
    /// Zero-valued default for users with no stored record
    fn default_for(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            cards_studied: 0,
            score: 0,
            study_streak: 0,
            mastered_words: Vec::new(),
            last_studied: None,
            created_at: None,
        }
    }
}

impl From<ProgressDoc> for ProgressResponse {
    fn from(doc: ProgressDoc) -> Self {
        Self {
            user_id: doc.user_id,
            cards_studied: doc.cards_studied,
            score: doc.score,
            study_streak: doc.study_streak,
            mastered_words: doc.mastered_words,
            last_studied: Some(doc.last_studied.to_chrono().to_rfc3339()),
            created_at: Some(doc.created_at.to_chrono().to_rfc3339()),
        }
    }
}

/// Handle GET /api/progress/{userId}
pub async fn handle_get_progress(state: Arc<AppState>, user_id: &str) -> Response<Full<Bytes>> {
    if user_id.is_empty() {
        return bad_request("userId is required");
    }

    match state.progress.get(user_id).await {
        Ok(Some(doc)) => json_response(StatusCode::OK, &ProgressResponse::from(doc)),
        Ok(None) => json_response(StatusCode::OK, &ProgressResponse::default_for(user_id)),
        Err(e) => error_response(&e, "Failed to fetch progress"),
    }
}

/// Handle POST /api/progress
pub async fn handle_update_progress(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Progress update body error: {}", e);
            return bad_request("Failed to read request body");
        }
    };

    let delta: ProgressDelta = match serde_json::from_slice(&body) {
        Ok(d) => d,
        Err(e) => {
            warn!("Progress update JSON parse error: {}", e);
            return bad_request(&format!("Invalid JSON: {}", e));
        }
    };

    match state.progress.update(delta).await {
        Ok(doc) => json_response(StatusCode::OK, &ProgressResponse::from(doc)),
        Err(e) => error_response(&e, "Failed to update progress"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_response_shape() {
        let response = ProgressResponse::default_for("u1");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "userId": "u1",
                "cardsStudied": 0,
                "score": 0,
                "studyStreak": 0,
                "masteredWords": [],
            })
        );
    }

    #[test]
    fn test_stored_record_serializes_camel_case() {
        let doc = ProgressDoc {
            id: None,
            user_id: "u1".to_string(),
            cards_studied: 5,
            score: 10,
            last_studied: bson::DateTime::from_millis(0),
            study_streak: 2,
            mastered_words: vec!["puella".to_string()],
            created_at: bson::DateTime::from_millis(0),
        };

        let json = serde_json::to_value(ProgressResponse::from(doc)).unwrap();
        assert_eq!(json["cardsStudied"], 5);
        assert_eq!(json["studyStreak"], 2);
        assert_eq!(json["masteredWords"], serde_json::json!(["puella"]));
        assert!(json["lastStudied"].is_string());
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_delta_parses_partial_body() {
        let delta: ProgressDelta =
            serde_json::from_str(r#"{"userId":"u1","masteredWords":["puer"]}"#).unwrap();

        assert_eq!(delta.user_id.as_deref(), Some("u1"));
        assert!(delta.cards_studied.is_none());
        assert!(delta.score.is_none());
        assert_eq!(delta.mastered_words.unwrap(), vec!["puer"]);
    }
}
