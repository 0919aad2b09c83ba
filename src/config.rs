//! Configuration for Latinitas
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Default and maximum number of history entries returned per query
pub const MAX_HISTORY_LIMIT: i64 = 50;

/// Latinitas - learning-progress tracking backend
#[derive(Parser, Debug, Clone)]
#[command(name = "latinitas")]
#[command(about = "Backend for a Latin vocabulary-learning client")]
pub struct Args {
    /// Unique node identifier for this instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:5000")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://127.0.0.1:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "latin-learning")]
    pub mongodb_db: String,

    /// Google Translate API key
    /// When absent, /api/translate degrades to a deterministic 500 instead of crashing
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY")]
    pub google_translate_api_key: Option<String>,

    /// Google Translate endpoint (overridable for testing)
    #[arg(
        long,
        env = "TRANSLATE_ENDPOINT",
        default_value = "https://translation.googleapis.com/language/translate/v2"
    )]
    pub translate_endpoint: String,

    /// Timeout for the external translation call, in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    /// Maximum translation-history entries returned per query (hard cap 50)
    #[arg(long, env = "HISTORY_LIMIT", default_value_t = MAX_HISTORY_LIMIT)]
    pub history_limit: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seed the vocabulary catalog on startup when the collection is empty
    #[arg(long, env = "SEED_VOCAB", default_value = "true")]
    pub seed_vocab: bool,
}

impl Args {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_uri.is_empty() {
            return Err("MONGODB_URI must not be empty".to_string());
        }
        if self.history_limit < 1 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(format!(
                "HISTORY_LIMIT must be between 1 and {MAX_HISTORY_LIMIT}"
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }
        if let Some(key) = &self.google_translate_api_key {
            if key.trim().is_empty() {
                return Err("GOOGLE_TRANSLATE_API_KEY must not be blank when set".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["latinitas"])
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(base_args().validate().is_ok());
    }

    #[test]
    fn test_history_limit_capped() {
        let mut args = base_args();
        args.history_limit = 100;
        assert!(args.validate().is_err());

        args.history_limit = 0;
        assert!(args.validate().is_err());

        args.history_limit = 25;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let mut args = base_args();
        args.google_translate_api_key = Some("  ".to_string());
        assert!(args.validate().is_err());
    }
}
