//! Routes served in `--serve` mode.
//!
//! - `POST /invoke`: run one extraction for an S3 notification body
//! - `GET  /healthz`: liveness
//! - `GET  /readyz`: readiness (record store reachable)

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        invoke_handlers::invoke,
    },
    services::{
        extraction_service::ExtractionService,
        ports::{Notifier, ObjectStore, RecordStore, TextDetector},
    },
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the router; the `ExtractionService` is carried as shared state.
pub fn routes<S, A, N, R>() -> Router<ExtractionService<S, A, N, R>>
where
    S: ObjectStore,
    A: TextDetector,
    N: Notifier,
    R: RecordStore,
{
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<S, A, N, R>))
        .route("/invoke", post(invoke::<S, A, N, R>))
}
