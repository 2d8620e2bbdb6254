//! The four external collaborators an extraction talks to.
//!
//! Each collaborator is a trait so the orchestration can run against the
//! AWS clients in production and in-memory fakes in tests.

use crate::models::{analysis::TextBlock, metadata::ObjectMetadata, record::PersistedRecord};
use thiserror::Error;

/// Failures reported by the text-detection service.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service could not read the document format.
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),

    /// The service rejected the request, usually because the object is not a
    /// document it can process.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Service(#[from] anyhow::Error),
}

/// Metadata-only access to stored objects.
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetch content type and size without downloading the payload.
    fn head(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<ObjectMetadata>> + Send;
}

/// Text detection over an object referenced by location.
pub trait TextDetector: Send + Sync + 'static {
    fn detect_text(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<Vec<TextBlock>, AnalysisError>> + Send;
}

/// Publish/subscribe channel that receives every extraction result.
pub trait Notifier: Send + Sync + 'static {
    fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Key-value store holding the latest extraction per object key.
pub trait RecordStore: Send + Sync + 'static {
    /// Write `record`, replacing whatever is stored under the same key.
    fn put(&self, record: &PersistedRecord) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Cheap reachability probe used by the readiness endpoint.
    fn check(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}
