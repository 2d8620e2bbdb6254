use crate::{models::record::PersistedRecord, services::ports::RecordStore};
use anyhow::Context;
use aws_sdk_dynamodb::{self as dynamodb, types::AttributeValue};

/// Attribute names used for a [`PersistedRecord`] item.
#[derive(Clone, Debug)]
pub struct RecordAttributes {
    /// Partition key attribute holding the object key.
    pub key: String,
    pub text: String,
}

/// Writes extraction results as DynamoDB items, one per object key.
///
/// `PutItem` replaces any existing item with the same partition key, which
/// gives the overwrite semantics the record store needs.
#[derive(Clone, Debug)]
pub struct DynamoRecordStore {
    inner: dynamodb::Client,
    table: String,
    attributes: RecordAttributes,
}

impl DynamoRecordStore {
    pub fn new(inner: dynamodb::Client, table: impl Into<String>, attributes: RecordAttributes) -> Self {
        Self {
            inner,
            table: table.into(),
            attributes,
        }
    }
}

impl RecordStore for DynamoRecordStore {
    #[tracing::instrument(skip(self, record), fields(table = %self.table, key = %record.key))]
    async fn put(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        self.inner
            .put_item()
            .table_name(&self.table)
            .item(&self.attributes.key, AttributeValue::S(record.key.clone()))
            .item(
                &self.attributes.text,
                AttributeValue::S(record.extracted_text.clone()),
            )
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{}", dynamodb::error::DisplayErrorContext(err)))
            .with_context(|| format!("PutItem into `{}` failed", self.table))?;

        Ok(())
    }

    async fn check(&self) -> anyhow::Result<()> {
        self.inner
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{}", dynamodb::error::DisplayErrorContext(err)))
            .with_context(|| format!("DescribeTable `{}` failed", self.table))?;

        Ok(())
    }
}
