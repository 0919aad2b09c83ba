//! User progress document schema
//!
//! One record per user, mutated only through the progress update engine.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for user progress
pub const PROGRESS_COLLECTION: &str = "user_progress";

/// Per-user learning-state snapshot stored in MongoDB
///
/// Field names match the client wire format (camelCase).
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Opaque caller-supplied user identifier, immutable once created
    pub user_id: String,

    /// Total flashcards studied; replaced by deltas, never decremented by them
    pub cards_studied: i64,

    /// Caller-supplied replacement score (not accumulated)
    pub score: i64,

    /// Timestamp of the most recent update; drives streak continuation
    pub last_studied: DateTime,

    /// Consecutive study days, >= 1 once the record exists
    pub study_streak: i64,

    /// Vocabulary the user marked as learned; grows by union, never shrinks
    #[serde(default)]
    pub mastered_words: Vec<String>,

    /// Fixed at first creation
    pub created_at: DateTime,
}

/// Caller-supplied partial update describing one study session
///
/// `cards_studied` and `score` follow a replace-if-present-and-nonzero rule:
/// a value of 0 is treated as absent (see `progress::engine`).
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDelta {
    pub user_id: Option<String>,
    pub cards_studied: Option<i64>,
    pub score: Option<i64>,
    pub mastered_words: Option<Vec<String>>,
}

impl IntoIndexes for ProgressDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // At most one record per userId
            (
                doc! { "userId": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("user_id_unique".to_string())
                        .build(),
                ),
            ),
        ]
    }
}
