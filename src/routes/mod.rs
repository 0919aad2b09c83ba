//! HTTP route handlers
//!
//! Handlers build `Response<Full<Bytes>>` directly; the router in
//! `server::http` dispatches on method and path.

mod health;
mod progress;
mod translate;
mod vocab;

pub use health::{api_health_check, health_check, version_info};
pub use progress::{handle_get_progress, handle_update_progress};
pub use translate::{handle_get_history, handle_translate};
pub use vocab::{
    handle_add_vocab, handle_list_vocab, handle_random_vocab, handle_vocab_by_declension,
    handle_vocab_by_pos,
};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::types::LatinitasError;

/// Build a JSON response with CORS headers
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_string(body)
        .unwrap_or_else(|_| r#"{"error":"Serialization failed"}"#.to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(json)))
        .unwrap()
}

/// Map a service error to an HTTP response
///
/// `db_context` is the route-specific message shown for storage failures;
/// the underlying error is logged, not surfaced.
pub(crate) fn error_response(err: &LatinitasError, db_context: &str) -> Response<Full<Bytes>> {
    match err {
        LatinitasError::InvalidInput { .. } => json_response(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({ "error": err.to_string() }),
        ),
        LatinitasError::MissingApiKey => json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &serde_json::json!({
                "error": "API key not configured",
                "translation": "Please configure GOOGLE_TRANSLATE_API_KEY in .env file",
            }),
        ),
        LatinitasError::Translation(message) => json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &serde_json::json!({
                "error": "Translation failed",
                "message": message,
            }),
        ),
        LatinitasError::Database(message) => {
            error!("{}: {}", db_context, message);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &serde_json::json!({ "error": db_context }),
            )
        }
        LatinitasError::NotFound(what) => json_response(
            StatusCode::NOT_FOUND,
            &serde_json::json!({ "error": "Not Found", "path": what }),
        ),
        LatinitasError::Internal(message) => {
            error!("{}: {}", db_context, message);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &serde_json::json!({ "error": db_context }),
            )
        }
        LatinitasError::Io(e) => {
            error!("{}: {}", db_context, e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &serde_json::json!({ "error": db_context }),
            )
        }
    }
}

/// Bad request response with a plain message
pub(crate) fn bad_request(message: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::BAD_REQUEST,
        &serde_json::json!({ "error": message }),
    )
}
