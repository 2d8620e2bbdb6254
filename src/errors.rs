use axum::http::StatusCode;
use thiserror::Error;

/// Every way a single extraction invocation can fail.
///
/// The first three variants describe a problem with the upload itself and
/// surface as `400`; everything else is an infrastructure failure and
/// surfaces as `500`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    MalformedEvent(String),

    /// Raised both for a content type outside the allow-list and for a
    /// document the analysis service refused to read.
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error(
        "No text was extracted from file: {key}. It might be empty or not contain readable text."
    )]
    EmptyExtraction { key: String },

    #[error("Text detection failed for file: {key}")]
    AnalysisService {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to publish extraction result for file: {key}: {source}")]
    Publish {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to persist extraction result for file: {key}: {source}")]
    Persist {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ExtractionError {
    /// Shortcut for a malformed notification naming the offending field.
    pub fn missing_field(field: &str) -> Self {
        Self::MalformedEvent(format!(
            "Invalid event format: Missing '{}' field for S3 event.",
            field
        ))
    }

    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedEvent(_) | Self::UnsupportedFormat(_) | Self::EmptyExtraction { .. }
        )
    }
}
