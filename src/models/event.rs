//! S3 upload notifications.
//!
//! The payload is accepted as raw JSON so a notification without `Records`
//! becomes a validation failure instead of a deserialization error raised
//! by the runtime before the handler runs.

use crate::errors::ExtractionError;
use serde::Deserialize;
use serde_json::Value;

/// Location of the uploaded object named by a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    /// Object key, already URL-decoded.
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct S3Record {
    s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Option<S3Bucket>,
    object: Option<S3Object>,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: Option<String>,
}

impl UploadEvent {
    /// Read bucket and key from the first record of an S3 notification.
    ///
    /// Only `Records[0]` is used; any further records are logged and ignored.
    pub fn from_payload(payload: &Value) -> Result<Self, ExtractionError> {
        let records = payload
            .get("Records")
            .and_then(Value::as_array)
            .filter(|records| !records.is_empty())
            .ok_or_else(|| ExtractionError::missing_field("Records"))?;

        tracing::debug!(record_count = records.len(), "parsing s3 notification");
        if records.len() > 1 {
            tracing::warn!(
                ignored = records.len() - 1,
                "notification carries more than one record; only the first is processed"
            );
        }

        let record = S3Record::deserialize(&records[0]).map_err(|err| {
            ExtractionError::MalformedEvent(format!(
                "Invalid event format: unreadable S3 record: {}",
                err
            ))
        })?;
        let entity = record
            .s3
            .ok_or_else(|| ExtractionError::missing_field("s3"))?;

        let bucket = entity
            .bucket
            .and_then(|bucket| bucket.name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ExtractionError::missing_field("s3.bucket.name"))?;
        let raw_key = entity
            .object
            .and_then(|object| object.key)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ExtractionError::missing_field("s3.object.key"))?;

        Ok(Self {
            bucket,
            key: decode_object_key(&raw_key)?,
        })
    }
}

/// S3 form-encodes keys in notifications: `+` stands for a space and
/// everything else non-alphanumeric is percent-escaped.
fn decode_object_key(raw: &str) -> Result<String, ExtractionError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|key| key.into_owned())
        .map_err(|err| {
            ExtractionError::MalformedEvent(format!(
                "Invalid event format: object key `{}` is not valid UTF-8 once decoded: {}",
                raw, err
            ))
        })
}
