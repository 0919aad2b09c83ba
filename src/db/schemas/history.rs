//! Translation history document schema
//!
//! Append-only log of translation events. Entries are immutable after
//! creation; this service never updates or deletes them.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for translation history
pub const HISTORY_COLLECTION: &str = "translation_history";

/// One recorded translation event
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// User who requested the translation ("anonymous" when unspecified)
    pub user_id: String,

    /// Text submitted for translation
    pub source_text: String,

    /// Text returned by the provider
    pub translated_text: String,

    /// Creation time; entries are listed newest-first by this field
    pub timestamp: DateTime,
}

impl HistoryDoc {
    /// Create a new entry timestamped now
    pub fn new(user_id: &str, source_text: &str, translated_text: &str) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            source_text: source_text.to_string(),
            translated_text: translated_text.to_string(),
            timestamp: DateTime::now(),
        }
    }
}

impl IntoIndexes for HistoryDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Newest-first listing per user
            (
                doc! { "userId": 1, "timestamp": -1 },
                Some(
                    IndexOptions::builder()
                        .name("user_id_timestamp_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}
