//! Translation history log
//!
//! Append-only, queryable newest-first per user, capped at 50 entries
//! per query. Appends never fail the caller's primary operation.

use async_trait::async_trait;
use bson::doc;
use tracing::error;

use crate::config::MAX_HISTORY_LIMIT;
use crate::db::schemas::{HistoryDoc, HISTORY_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::Result;

/// Destination for translation events
///
/// Implementations must not fail the caller's primary operation.
#[async_trait]
pub trait HistorySink: Send + Sync {
    async fn append(&self, entry: HistoryDoc);
}

/// Append-only translation event log
pub struct HistoryLog {
    collection: MongoCollection<HistoryDoc>,
}

impl HistoryLog {
    /// Open the history collection
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        let collection = mongo.collection::<HistoryDoc>(HISTORY_COLLECTION).await?;
        Ok(Self { collection })
    }

    /// List a user's entries, newest first, capped at `limit` (max 50)
    pub async fn list_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<HistoryDoc>> {
        self.collection
            .find_many(
                doc! { "userId": user_id },
                Some(doc! { "timestamp": -1 }),
                None,
                Some(effective_limit(limit)),
            )
            .await
    }
}

/// Clamp a caller-supplied limit to [1, 50]
fn effective_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_HISTORY_LIMIT)
}

#[async_trait]
impl HistorySink for HistoryLog {
    /// Append an entry
    ///
    /// Failures are logged and swallowed: a successful translation must
    /// still be returned to the caller even if the log write fails.
    async fn append(&self, entry: HistoryDoc) {
        if let Err(e) = self.collection.insert_one(&entry).await {
            error!(
                user_id = %entry.user_id,
                "Failed to append translation history entry: {}",
                e
            );
        }
    }
}
