//! Vocabulary catalog endpoints
//!
//! Read-mostly plumbing over the catalog:
//! - GET /api/vocab, GET /api/vocab/random
//! - GET /api/vocab/declension/{declension}, GET /api/vocab/pos/{pos}
//! - POST /api/vocab

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;
use tracing::warn;

use crate::db::schemas::VocabDoc;
use crate::routes::{bad_request, error_response, json_response};
use crate::server::AppState;

/// Handle GET /api/vocab
pub async fn handle_list_vocab(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.vocab.all().await {
        Ok(entries) => json_response(StatusCode::OK, &entries),
        Err(e) => error_response(&e, "Failed to fetch vocabulary"),
    }
}

/// Handle GET /api/vocab/random
pub async fn handle_random_vocab(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.vocab.random().await {
        Ok(Some(entry)) => json_response(StatusCode::OK, &entry),
        Ok(None) => json_response(StatusCode::OK, &serde_json::Value::Null),
        Err(e) => error_response(&e, "Failed to fetch random vocabulary"),
    }
}

/// Handle GET /api/vocab/declension/{declension}
pub async fn handle_vocab_by_declension(
    state: Arc<AppState>,
    declension: &str,
) -> Response<Full<Bytes>> {
    match state.vocab.by_declension(declension).await {
        Ok(entries) => json_response(StatusCode::OK, &entries),
        Err(e) => error_response(&e, "Failed to fetch vocabulary by declension"),
    }
}

/// Handle GET /api/vocab/pos/{pos}
pub async fn handle_vocab_by_pos(state: Arc<AppState>, pos: &str) -> Response<Full<Bytes>> {
    match state.vocab.by_part_of_speech(pos).await {
        Ok(entries) => json_response(StatusCode::OK, &entries),
        Err(e) => error_response(&e, "Failed to fetch vocabulary by part of speech"),
    }
}

/// Handle POST /api/vocab
pub async fn handle_add_vocab(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Vocab insert body error: {}", e);
            return bad_request("Failed to read request body");
        }
    };

    let mut entry: VocabDoc = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!("Vocab insert JSON parse error: {}", e);
            return bad_request(&format!("Invalid JSON: {}", e));
        }
    };

    match state.vocab.insert(&entry).await {
        Ok(id) => {
            entry.id = Some(id);
            json_response(StatusCode::CREATED, &entry)
        }
        Err(e) => error_response(&e, "Failed to add vocabulary"),
    }
}
