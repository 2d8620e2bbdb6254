//! In-memory collaborators for exercising the orchestration in tests.

use crate::{
    models::{analysis::TextBlock, metadata::ObjectMetadata, record::PersistedRecord},
    services::ports::{AnalysisError, Notifier, ObjectStore, RecordStore, TextDetector},
};
use anyhow::anyhow;
use std::{collections::HashMap, sync::Mutex};

pub struct FakeObjectStore {
    metadata: Result<ObjectMetadata, String>,
}

impl FakeObjectStore {
    pub fn with_content_type(content_type: &str) -> Self {
        Self {
            metadata: Ok(ObjectMetadata::new(content_type, 2048)),
        }
    }

    pub fn without_content_type() -> Self {
        Self {
            metadata: Ok(ObjectMetadata::default()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            metadata: Err(message.to_string()),
        }
    }
}

impl ObjectStore for FakeObjectStore {
    async fn head(&self, _bucket: &str, _key: &str) -> anyhow::Result<ObjectMetadata> {
        self.metadata.clone().map_err(|message| anyhow!(message))
    }
}

#[derive(Clone)]
pub enum DetectorOutcome {
    Blocks(Vec<TextBlock>),
    Unsupported,
    InvalidParameter,
    ServiceFailure,
}

pub struct FakeDetector {
    outcome: Mutex<DetectorOutcome>,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeDetector {
    pub fn new(outcome: DetectorOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_outcome(&self, outcome: DetectorOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(String, String)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl TextDetector for FakeDetector {
    async fn detect_text(&self, bucket: &str, key: &str) -> Result<Vec<TextBlock>, AnalysisError> {
        self.requests
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));

        match self.outcome.lock().unwrap().clone() {
            DetectorOutcome::Blocks(blocks) => Ok(blocks),
            DetectorOutcome::Unsupported => Err(AnalysisError::UnsupportedDocument(
                "Request has unsupported document format".into(),
            )),
            DetectorOutcome::InvalidParameter => Err(AnalysisError::InvalidParameter(
                "Request has invalid parameters".into(),
            )),
            DetectorOutcome::ServiceFailure => Err(AnalysisError::Service(anyhow!(
                "ProvisionedThroughputExceededException"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PublishedMessage {
    pub topic: String,
    pub subject: String,
    pub message: String,
}

#[derive(Default)]
pub struct FakeNotifier {
    fail: bool,
    published: Mutex<Vec<PublishedMessage>>,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow!("AuthorizationErrorException"));
        }
        self.published.lock().unwrap().push(PublishedMessage {
            topic: topic.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeRecordStore {
    fail: bool,
    records: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl FakeRecordStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Number of attempted writes, failed ones included.
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl RecordStore for FakeRecordStore {
    async fn put(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        *self.writes.lock().unwrap() += 1;
        if self.fail {
            return Err(anyhow!("ResourceNotFoundException: table not found"));
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.key.clone(), record.extracted_text.clone());
        Ok(())
    }

    async fn check(&self) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow!("table not found"));
        }
        Ok(())
    }
}
