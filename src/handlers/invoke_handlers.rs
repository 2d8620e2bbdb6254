//! `POST /invoke`: run one extraction over HTTP.
//!
//! Accepts the same S3 notification document the Lambda runtime delivers and
//! answers with the mapped status and JSON body.

use crate::{
    models::response::InvocationResponse,
    services::{
        extraction_service::ExtractionService,
        ports::{Notifier, ObjectStore, RecordStore, TextDetector},
    },
};
use axum::{Json, extract::State};
use serde_json::Value;
use uuid::Uuid;

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn invoke<S, A, N, R>(
    State(service): State<ExtractionService<S, A, N, R>>,
    Json(payload): Json<Value>,
) -> InvocationResponse
where
    S: ObjectStore,
    A: TextDetector,
    N: Notifier,
    R: RecordStore,
{
    tracing::debug!(%payload, "received event");
    service.handle(&payload).await
}
