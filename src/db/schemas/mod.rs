//! Database schemas for Latinitas
//!
//! MongoDB document structures for user progress, translation history,
//! and the vocabulary catalog.

mod history;
mod progress;
mod vocab;

pub use history::{HistoryDoc, HISTORY_COLLECTION};
pub use progress::{ProgressDelta, ProgressDoc, PROGRESS_COLLECTION};
pub use vocab::{VocabDoc, VOCAB_COLLECTION};
