//! Vocabulary catalog document schema

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for vocabulary entries
pub const VOCAB_COLLECTION: &str = "vocab";

/// One vocabulary catalog entry
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VocabDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Latin headword with principal parts, e.g. "agricola, agricolae"
    pub latin: String,

    /// English gloss
    pub english: String,

    /// Grammatical gender (nouns only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Part of speech (noun, verb, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,

    /// Declension (nouns only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declension: Option<String>,

    /// Difficulty bucket, defaults to "beginner"
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    "beginner".to_string()
}

impl IntoIndexes for VocabDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (
                doc! { "declension": 1 },
                Some(
                    IndexOptions::builder()
                        .name("declension_index".to_string())
                        .build(),
                ),
            ),
            (
                doc! { "partOfSpeech": 1 },
                Some(
                    IndexOptions::builder()
                        .name("part_of_speech_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}
