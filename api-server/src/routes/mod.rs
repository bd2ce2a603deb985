//! Route handlers

pub mod files;
pub mod generate;
pub mod health;
pub mod invoke;
pub mod manifest;

use axum::{
    http::{header, HeaderMap, StatusCode},
    Json, Router,
};
use serde::Serialize;

use filegen_core::Error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a core error to its HTTP status and message
pub fn core_error(err: Error) -> ApiError {
    let status = match &err {
        Error::Validation(_) | Error::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
        Error::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
        Error::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
        Error::Generation(_) | Error::UpstreamConfig | Error::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    api_error(status, err.to_string())
}

/// Base URL of this server for the current request, ending in `/`
pub fn request_host_url(state: &AppState, headers: &HeaderMap) -> String {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    state.config().host_url(host)
}

/// Create the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(manifest::router())
        .merge(generate::router())
        .merge(invoke::router())
        .merge(files::router())
}
