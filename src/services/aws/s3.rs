use crate::{models::metadata::ObjectMetadata, services::ports::ObjectStore};
use anyhow::Context;
use aws_sdk_s3 as s3;

#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    inner: s3::Client,
}

impl S3ObjectStore {
    pub fn new(inner: s3::Client) -> Self {
        Self { inner }
    }
}

impl ObjectStore for S3ObjectStore {
    #[tracing::instrument(skip(self))]
    async fn head(&self, bucket: &str, key: &str) -> anyhow::Result<ObjectMetadata> {
        let output = self
            .inner
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{}", s3::error::DisplayErrorContext(err)))
            .context("HeadObject failed")?;

        Ok(ObjectMetadata {
            content_type: output.content_type().map(str::to_string),
            content_length: output.content_length(),
        })
    }
}
