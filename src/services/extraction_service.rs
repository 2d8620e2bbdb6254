//! ExtractionService: the validate → analyze → aggregate → publish sequence
//! for a single upload notification.
//!
//! Every step awaits its collaborator before the next one starts, and the
//! first failure ends the invocation. The notification and the record write
//! are two independent side effects: when the write fails after the publish
//! succeeded, the invocation still fails and the published message stays
//! published. Nothing is rolled back and nothing is retried.

use crate::{
    errors::ExtractionError,
    models::{
        analysis::TextBlock,
        event::UploadEvent,
        metadata::ObjectMetadata,
        record::{NotificationMessage, PersistedRecord},
        response::InvocationResponse,
    },
    services::{
        aggregator::aggregate_text,
        ports::{AnalysisError, Notifier, ObjectStore, RecordStore, TextDetector},
    },
};
use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;

/// Deployment values the orchestration needs, injected at construction.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Topic every extraction result is published to.
    pub topic_arn: String,

    /// Subject line attached to each published message.
    pub subject: String,

    /// Content types accepted for analysis.
    pub allowed_content_types: Vec<String>,
}

pub struct ExtractionService<S, A, N, R> {
    objects: Arc<S>,
    analyzer: Arc<A>,
    notifier: Arc<N>,
    records: Arc<R>,
    config: Arc<PipelineConfig>,
}

impl<S, A, N, R> Clone for ExtractionService<S, A, N, R> {
    fn clone(&self) -> Self {
        Self {
            objects: self.objects.clone(),
            analyzer: self.analyzer.clone(),
            notifier: self.notifier.clone(),
            records: self.records.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, A, N, R> ExtractionService<S, A, N, R>
where
    S: ObjectStore,
    A: TextDetector,
    N: Notifier,
    R: RecordStore,
{
    pub fn new(objects: S, analyzer: A, notifier: N, records: R, config: PipelineConfig) -> Self {
        Self {
            objects: Arc::new(objects),
            analyzer: Arc::new(analyzer),
            notifier: Arc::new(notifier),
            records: Arc::new(records),
            config: Arc::new(config),
        }
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    /// Run one invocation and map its outcome to a response.
    ///
    /// Never fails: every error becomes a `400` or `500` response.
    pub async fn handle(&self, payload: &Value) -> InvocationResponse {
        let outcome = self.process(payload).await;
        match &outcome {
            Ok(text) => tracing::info!(text_len = text.len(), "extraction complete"),
            Err(err) if err.is_client_error() => {
                tracing::warn!(error = %err, "rejected upload")
            }
            Err(err) => tracing::error!(error = ?err, "extraction failed"),
        }
        outcome.into()
    }

    /// Run every step for the notification in `payload` and return the
    /// extracted text.
    pub async fn process(&self, payload: &Value) -> Result<String, ExtractionError> {
        let event = UploadEvent::from_payload(payload)?;
        tracing::info!(bucket = %event.bucket, key = %event.key, "processing upload");

        self.validate_metadata(&event).await?;
        let blocks = self.analyze(&event).await?;
        let text = aggregate_text(&event.key, &blocks)?;
        tracing::info!(key = %event.key, text_len = text.len(), "aggregated text");
        tracing::debug!(extracted_text = %text);

        self.publish(&event, &text).await?;
        Ok(text)
    }

    /// Check the object's content type against the allow-list.
    ///
    /// Size is logged but not limited.
    #[tracing::instrument(skip_all, fields(bucket = %event.bucket, key = %event.key))]
    async fn validate_metadata(
        &self,
        event: &UploadEvent,
    ) -> Result<ObjectMetadata, ExtractionError> {
        let metadata = self
            .objects
            .head(&event.bucket, &event.key)
            .await
            .with_context(|| {
                format!(
                    "failed to read metadata for s3://{}/{}",
                    event.bucket, event.key
                )
            })?;

        tracing::info!(
            content_type = metadata.content_type_or_unknown(),
            content_length = ?metadata.content_length,
            "fetched object metadata"
        );

        if !metadata.is_allowed(&self.config.allowed_content_types) {
            return Err(ExtractionError::UnsupportedFormat(format!(
                "Unsupported document format: {} for file: {}",
                metadata.content_type_or_unknown(),
                event.key
            )));
        }

        Ok(metadata)
    }

    #[tracing::instrument(skip_all, fields(bucket = %event.bucket, key = %event.key))]
    async fn analyze(&self, event: &UploadEvent) -> Result<Vec<TextBlock>, ExtractionError> {
        let blocks = self
            .analyzer
            .detect_text(&event.bucket, &event.key)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "text detection failed");
                match err {
                    AnalysisError::UnsupportedDocument(_) => ExtractionError::UnsupportedFormat(
                        format!("Unsupported document format for file: {}", event.key),
                    ),
                    AnalysisError::InvalidParameter(_) => ExtractionError::UnsupportedFormat(
                        format!("Invalid file for text detection: {}", event.key),
                    ),
                    AnalysisError::Service(source) => ExtractionError::AnalysisService {
                        key: event.key.clone(),
                        source,
                    },
                }
            })?;

        tracing::debug!(block_count = blocks.len(), "text detection returned");
        Ok(blocks)
    }

    /// Publish to the topic, then overwrite the stored record.
    #[tracing::instrument(skip_all, fields(bucket = %event.bucket, key = %event.key))]
    async fn publish(&self, event: &UploadEvent, text: &str) -> Result<(), ExtractionError> {
        let message = NotificationMessage {
            bucket: event.bucket.clone(),
            object_key: event.key.clone(),
            extracted_text: text.to_string(),
        };
        let body = serde_json::to_string(&message).context("serializing notification message")?;

        self.notifier
            .publish(&self.config.topic_arn, &self.config.subject, &body)
            .await
            .map_err(|source| ExtractionError::Publish {
                key: event.key.clone(),
                source,
            })?;
        tracing::info!(topic = %self.config.topic_arn, "published extraction result");

        // The message above is already out; a failure here is reported as
        // such without undoing it.
        self.records
            .put(&PersistedRecord::new(event.key.clone(), text))
            .await
            .map_err(|source| ExtractionError::Persist {
                key: event.key.clone(),
                source,
            })?;
        tracing::info!("persisted extraction result");

        Ok(())
    }
}
