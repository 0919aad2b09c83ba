//! Vocabulary catalog
//!
//! Read-mostly lookup table queried by declension and part of speech,
//! seeded at startup when empty.

use bson::doc;
use rand::Rng;
use tracing::info;

use crate::db::schemas::{VocabDoc, VOCAB_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::Result;

/// Vocabulary catalog storage
pub struct VocabStore {
    collection: MongoCollection<VocabDoc>,
}

impl VocabStore {
    /// Open the vocab collection
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        let collection = mongo.collection::<VocabDoc>(VOCAB_COLLECTION).await?;
        Ok(Self { collection })
    }

    /// All catalog entries
    pub async fn all(&self) -> Result<Vec<VocabDoc>> {
        self.collection.find_many(doc! {}, None, None, None).await
    }

    /// One uniformly random entry, or None when the catalog is empty
    pub async fn random(&self) -> Result<Option<VocabDoc>> {
        let count = self.collection.count(doc! {}).await?;
        if count == 0 {
            return Ok(None);
        }

        let skip = rand::thread_rng().gen_range(0..count);
        let mut found = self
            .collection
            .find_many(doc! {}, None, Some(skip), Some(1))
            .await?;
        Ok(found.pop())
    }

    /// Entries for one declension
    pub async fn by_declension(&self, declension: &str) -> Result<Vec<VocabDoc>> {
        self.collection
            .find_many(doc! { "declension": declension }, None, None, None)
            .await
    }

    /// Entries for one part of speech
    pub async fn by_part_of_speech(&self, pos: &str) -> Result<Vec<VocabDoc>> {
        self.collection
            .find_many(doc! { "partOfSpeech": pos }, None, None, None)
            .await
    }

    /// Insert a new entry, returning its assigned ID
    pub async fn insert(&self, entry: &VocabDoc) -> Result<bson::oid::ObjectId> {
        self.collection.insert_one(entry).await
    }

    /// Seed the starter vocabulary when the collection is empty
    pub async fn seed_if_empty(&self) -> Result<()> {
        if self.collection.count(doc! {}).await? > 0 {
            return Ok(());
        }

        for entry in starter_vocab() {
            self.collection.insert_one(&entry).await?;
        }
        info!("Vocabulary initialized with starter entries");
        Ok(())
    }
}

fn noun(latin: &str, english: &str, gender: &str, declension: &str) -> VocabDoc {
    VocabDoc {
        id: None,
        latin: latin.to_string(),
        english: english.to_string(),
        gender: Some(gender.to_string()),
        part_of_speech: Some("noun".to_string()),
        declension: Some(declension.to_string()),
        difficulty: "beginner".to_string(),
    }
}

fn verb(latin: &str, english: &str) -> VocabDoc {
    VocabDoc {
        id: None,
        latin: latin.to_string(),
        english: english.to_string(),
        gender: None,
        part_of_speech: Some("verb".to_string()),
        declension: None,
        difficulty: "beginner".to_string(),
    }
}

/// Starter catalog (first-declension nouns and common verbs)
fn starter_vocab() -> Vec<VocabDoc> {
    vec![
        noun("agricola, agricolae", "farmer", "m", "first"),
        noun("anima, animae", "breath; life force; soul", "f", "first"),
        noun("dea, deae", "goddess", "f", "first"),
        noun("fāma, fāmae", "report, rumor; reputation, fame", "f", "first"),
        noun("fēmina, fēminae", "woman; wife", "f", "first"),
        verb("sum, esse", "be; exist"),
        verb("amō, amāre", "love"),
        verb("possum, posse", "be able, can"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_vocab_shape() {
        let entries = starter_vocab();
        assert_eq!(entries.len(), 8);
        assert!(entries
            .iter()
            .filter(|e| e.part_of_speech.as_deref() == Some("noun"))
            .all(|e| e.declension.as_deref() == Some("first")));
        assert!(entries.iter().all(|e| e.difficulty == "beginner"));
    }
}
