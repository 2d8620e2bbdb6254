//! What gets fanned out once text has been extracted.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Message published to the notification topic.
///
/// Field names on the wire are snake_case; subscribers parse them as such.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotificationMessage {
    pub bucket: String,
    pub object_key: String,
    pub extracted_text: String,
}

/// Extraction result stored under the object key.
///
/// A later write for the same key replaces this record entirely.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct PersistedRecord {
    /// Object key the text was extracted from.
    #[sqlx(rename = "object_key")]
    pub key: String,

    pub extracted_text: String,
}

impl PersistedRecord {
    pub fn new(key: impl Into<String>, extracted_text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            extracted_text: extracted_text.into(),
        }
    }
}
