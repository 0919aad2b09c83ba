//! Latinitas - backend for a Latin vocabulary-learning client
//!
//! Persists per-user learning progress and translation history in MongoDB,
//! proxies Google Translate, and serves a small vocabulary catalog.
//!
//! ## Services
//!
//! - **Progress**: per-user study state (cards studied, score, mastered words,
//!   study streak) with per-user write serialization
//! - **History**: append-only translation log, newest-first reads
//! - **Translate**: external translation call plus history recording pipeline
//! - **Vocab**: read-mostly vocabulary catalog with startup seeding

pub mod config;
pub mod db;
pub mod history;
pub mod progress;
pub mod routes;
pub mod server;
pub mod translate;
pub mod types;
pub mod vocab;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{LatinitasError, Result};
