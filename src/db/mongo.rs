//! MongoDB client and collection wrapper

use bson::{doc, oid::ObjectId, Document};
use mongodb::{
    options::{FindOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};

use crate::types::LatinitasError;

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client
    ///
    /// A failed startup ping is downgraded to a warning: the driver retries
    /// per operation, so the service stays up and individual requests fail
    /// with `Database` errors until MongoDB is reachable again.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, LatinitasError> {
        info!("Connecting to MongoDB at {}", uri);

        // Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| LatinitasError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        match client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => info!("Connected to MongoDB database '{}'", db_name),
            Err(e) => warn!(
                "MongoDB ping failed ({}), continuing - operations will retry per request",
                e
            ),
        }

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>, LatinitasError>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
{
    /// Create a new collection and apply indexes
    pub async fn new(
        client: &Client,
        db_name: &str,
        collection_name: &str,
    ) -> Result<Self, LatinitasError> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        // MongoDB may be unreachable at startup; index creation is retried
        // implicitly on next process start
        if let Err(e) = mongo_collection.apply_indexes().await {
            warn!(
                "Failed to apply indexes on '{}': {} - continuing",
                collection_name, e
            );
        }

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<(), LatinitasError> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| LatinitasError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document
    pub async fn insert_one(&self, item: &T) -> Result<ObjectId, LatinitasError> {
        let result = self
            .inner
            .insert_one(item)
            .await
            .map_err(|e| LatinitasError::Database(format!("Insert failed: {}", e)))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| LatinitasError::Database("Failed to get inserted ID".into()))
    }

    /// Find one document by filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, LatinitasError> {
        self.inner
            .find_one(filter)
            .await
            .map_err(|e| LatinitasError::Database(format!("Find failed: {}", e)))
    }

    /// Find many documents by filter with optional sort, skip, and limit
    pub async fn find_many(
        &self,
        filter: Document,
        sort: Option<Document>,
        skip: Option<u64>,
        limit: Option<i64>,
    ) -> Result<Vec<T>, LatinitasError> {
        use futures_util::StreamExt;

        let options = FindOptions::builder()
            .sort(sort)
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self
            .inner
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| LatinitasError::Database(format!("Find failed: {}", e)))?;

        let results: Vec<T> = cursor
            .filter_map(|doc| async {
                match doc {
                    Ok(d) => Some(d),
                    Err(e) => {
                        error!("Error reading document: {}", e);
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(results)
    }

    /// Replace a document matching the filter, inserting it if absent
    pub async fn replace_upsert(&self, filter: Document, item: &T) -> Result<(), LatinitasError> {
        self.inner
            .replace_one(filter, item)
            .upsert(true)
            .await
            .map_err(|e| LatinitasError::Database(format!("Upsert failed: {}", e)))?;

        Ok(())
    }

    /// Count documents matching the filter
    pub async fn count(&self, filter: Document) -> Result<u64, LatinitasError> {
        self.inner
            .count_documents(filter)
            .await
            .map_err(|e| LatinitasError::Database(format!("Count failed: {}", e)))
    }

    /// Get the underlying collection for advanced operations
    pub fn inner(&self) -> &Collection<T> {
        &self.inner
    }
}
