//! Health & readiness handlers for serve mode.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the record store

use crate::services::{
    extraction_service::ExtractionService,
    ports::{Notifier, ObjectStore, RecordStore, TextDetector},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;

/// `GET /healthz`
///
/// Always returns 200 OK without touching any collaborator.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// HTTP 200 when the record store answers, HTTP 503 otherwise.
pub async fn readyz<S, A, N, R>(
    State(service): State<ExtractionService<S, A, N, R>>,
) -> impl IntoResponse
where
    S: ObjectStore,
    A: TextDetector,
    N: Notifier,
    R: RecordStore,
{
    let record_store = match service.records().check().await {
        Ok(()) => CheckStatus {
            ok: true,
            error: None,
        },
        Err(e) => CheckStatus {
            ok: false,
            error: Some(format!("{:#}", e)),
        },
    };
    let overall_ok = record_store.ok;

    let mut checks = HashMap::new();
    checks.insert("record_store", record_store);

    let body = ReadyResponse {
        status: if overall_ok {
            "ok".into()
        } else {
            "error".into()
        },
        checks,
    };

    let status = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
