//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. One task per
//! connection; suspension happens only at MongoDB I/O and the external
//! translator call.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::MongoClient;
use crate::history::HistoryLog;
use crate::progress::ProgressStore;
use crate::routes;
use crate::translate::{GoogleTranslator, TranslationService};
use crate::types::LatinitasError;
use crate::vocab::VocabStore;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub mongo: MongoClient,
    /// Per-user progress storage with serialized writes
    pub progress: ProgressStore,
    /// Append-only translation log
    pub history: Arc<HistoryLog>,
    /// Vocabulary catalog
    pub vocab: VocabStore,
    /// Translator + history recording pipeline
    pub translation: TranslationService,
}

impl AppState {
    /// Create AppState, opening all collections and the translator client
    pub async fn new(args: Args, mongo: MongoClient) -> Result<Self, LatinitasError> {
        let progress = ProgressStore::new(&mongo).await?;
        let history = Arc::new(HistoryLog::new(&mongo).await?);
        let vocab = VocabStore::new(&mongo).await?;

        let translator = Arc::new(GoogleTranslator::new(
            args.translate_endpoint.clone(),
            args.google_translate_api_key.clone(),
            Duration::from_millis(args.request_timeout_ms),
        )?);
        let translation = TranslationService::new(translator, history.clone());

        Ok(Self {
            args,
            mongo,
            progress,
            history,
            vocab,
            translation,
        })
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), LatinitasError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Latinitas listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Client-facing health check
        (Method::GET, "/api/health") => routes::api_health_check(),

        // Liveness probe with service details
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state))
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        // Progress
        (Method::GET, p) if p.starts_with("/api/progress/") => {
            let user_id = p.strip_prefix("/api/progress/").unwrap_or("");
            routes::handle_get_progress(Arc::clone(&state), user_id).await
        }
        (Method::POST, "/api/progress") => {
            routes::handle_update_progress(req, Arc::clone(&state)).await
        }

        // Translation
        (Method::POST, "/api/translate") => routes::handle_translate(req, Arc::clone(&state)).await,
        (Method::GET, p) if p.starts_with("/api/translations/") => {
            let user_id = p.strip_prefix("/api/translations/").unwrap_or("");
            routes::handle_get_history(Arc::clone(&state), user_id).await
        }

        // Vocabulary catalog
        (Method::GET, "/api/vocab") => routes::handle_list_vocab(Arc::clone(&state)).await,
        (Method::GET, "/api/vocab/random") => routes::handle_random_vocab(Arc::clone(&state)).await,
        (Method::GET, p) if p.starts_with("/api/vocab/declension/") => {
            let declension = p.strip_prefix("/api/vocab/declension/").unwrap_or("");
            routes::handle_vocab_by_declension(Arc::clone(&state), declension).await
        }
        (Method::GET, p) if p.starts_with("/api/vocab/pos/") => {
            let pos = p.strip_prefix("/api/vocab/pos/").unwrap_or("");
            routes::handle_vocab_by_pos(Arc::clone(&state), pos).await
        }
        (Method::POST, "/api/vocab") => routes::handle_add_vocab(req, Arc::clone(&state)).await,

        // Not found
        _ => not_found_response(&path),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
