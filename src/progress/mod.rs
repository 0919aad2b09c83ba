//! Learning progress tracking
//!
//! `engine` holds the pure delta-application logic; `store` wraps the
//! MongoDB collection and serializes writes per user.

pub mod engine;
pub mod store;

pub use engine::apply_delta;
pub use store::ProgressStore;
