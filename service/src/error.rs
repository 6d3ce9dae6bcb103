//! The `ApiError` type wraps every input-shape failure the dispatcher can raise into a uniform
//! 400 JSON envelope. Anything past request validation is resolved into a `JudgeResponse` with a
//! non-2xx-free HTTP 200, per §7: only malformed requests get a 4xx.
//!

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::BadRequest(message) = &self;
        (StatusCode::BAD_REQUEST, Json(ErrorEnvelope { error: message })).into_response()
    }
}
