use crate::{
    models::response::InvocationResponse,
    services::{
        extraction_service::ExtractionService,
        ports::{Notifier, ObjectStore, RecordStore, TextDetector},
    },
};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;

/// Processes one S3 upload notification.
///
/// Failures are reported through the response's status code, so the
/// invocation itself always succeeds.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler<S, A, N, R>(
    service: &ExtractionService<S, A, N, R>,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error>
where
    S: ObjectStore,
    A: TextDetector,
    N: Notifier,
    R: RecordStore,
{
    tracing::debug!(payload = %event.payload, "received event");
    Ok(service.handle(&event.payload).await)
}
