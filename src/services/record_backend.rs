//! Record store chosen at startup.

use crate::{
    models::record::PersistedRecord,
    services::{aws::DynamoRecordStore, ports::RecordStore, sqlite_store::SqliteRecordStore},
};

/// DynamoDB in production, SQLite when a local `sqlite://` URL is configured.
#[derive(Clone, Debug)]
pub enum RecordBackend {
    Dynamo(DynamoRecordStore),
    Sqlite(SqliteRecordStore),
}

impl RecordBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dynamo(_) => "dynamodb",
            Self::Sqlite(_) => "sqlite",
        }
    }
}

impl RecordStore for RecordBackend {
    async fn put(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        match self {
            Self::Dynamo(store) => store.put(record).await,
            Self::Sqlite(store) => store.put(record).await,
        }
    }

    async fn check(&self) -> anyhow::Result<()> {
        match self {
            Self::Dynamo(store) => store.check().await,
            Self::Sqlite(store) => store.check().await,
        }
    }
}
