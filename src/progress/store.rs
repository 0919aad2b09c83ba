//! Progress store
//!
//! Keyed storage of one progress record per user. Updates run the read,
//! the engine computation, and the whole-record upsert under a per-user
//! async lock, so concurrent updates for the same user cannot both read
//! the same prior state and lose a mastered-words union. Updates for
//! different users proceed in parallel. The lock is never held across
//! the external translator call (translation does not touch progress).

use bson::{doc, DateTime};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::db::schemas::{ProgressDelta, ProgressDoc, PROGRESS_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::progress::engine;
use crate::types::{LatinitasError, Result};

/// Per-user progress storage with serialized writes
pub struct ProgressStore {
    collection: MongoCollection<ProgressDoc>,
    /// One lock per userId; entries are tiny and never evicted
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ProgressStore {
    /// Open the progress collection
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        let collection = mongo.collection::<ProgressDoc>(PROGRESS_COLLECTION).await?;
        Ok(Self {
            collection,
            locks: DashMap::new(),
        })
    }

    /// Fetch the stored record for a user, if any
    pub async fn get(&self, user_id: &str) -> Result<Option<ProgressDoc>> {
        self.collection.find_one(doc! { "userId": user_id }).await
    }

    /// Apply a study delta and persist the resulting record
    ///
    /// Serialized per userId: get, apply_delta, and put behave as one
    /// atomic step with respect to other updates for the same user.
    pub async fn update(&self, delta: ProgressDelta) -> Result<ProgressDoc> {
        let user_id = match delta.user_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(LatinitasError::InvalidInput { field: "userId" }),
        };

        let lock = self
            .locks
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let current = self.get(&user_id).await?;
        let next = engine::apply_delta(current.as_ref(), &delta, DateTime::now());

        debug!(
            user_id = %user_id,
            cards_studied = next.cards_studied,
            study_streak = next.study_streak,
            "Persisting progress update"
        );

        self.collection
            .replace_upsert(doc! { "userId": &user_id }, &next)
            .await?;

        Ok(next)
    }
}
