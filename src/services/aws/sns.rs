use crate::services::ports::Notifier;
use anyhow::Context;
use aws_sdk_sns as sns;

#[derive(Clone, Debug)]
pub struct SnsNotifier {
    inner: sns::Client,
}

impl SnsNotifier {
    pub fn new(inner: sns::Client) -> Self {
        Self { inner }
    }
}

impl Notifier for SnsNotifier {
    #[tracing::instrument(skip(self, message))]
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> anyhow::Result<()> {
        let output = self
            .inner
            .publish()
            .topic_arn(topic)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{}", sns::error::DisplayErrorContext(err)))
            .context("SNS Publish failed")?;

        tracing::debug!(message_id = ?output.message_id(), "sns publish acknowledged");
        Ok(())
    }
}
