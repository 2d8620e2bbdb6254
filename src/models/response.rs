//! The synchronous result handed back to whoever triggered the invocation.

use crate::errors::ExtractionError;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// HTTP-style status and JSON body, in the shape the Lambda proxy
/// integrations expect.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    /// JSON document encoded as a string.
    pub body: String,
}

impl InvocationResponse {
    pub fn success(extracted_text: &str) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            body: json!({ "extractedText": extracted_text }).to_string(),
        }
    }

    pub fn failure(err: &ExtractionError) -> Self {
        Self {
            status_code: err.status().as_u16(),
            body: json!({ "error": err.to_string() }).to_string(),
        }
    }
}

impl From<Result<String, ExtractionError>> for InvocationResponse {
    fn from(outcome: Result<String, ExtractionError>) -> Self {
        match outcome {
            Ok(text) => Self::success(&text),
            Err(err) => Self::failure(&err),
        }
    }
}

impl IntoResponse for InvocationResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}
