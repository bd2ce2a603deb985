//! File generation endpoint

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use filegen_core::document::{self, DocumentFormat};
use filegen_core::store::validate_filename;
use filegen_core::Error;

use super::{api_error, core_error, request_host_url, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateFileRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateFileResponse {
    pub url: String,
}

/// POST /generate/{format} - Synthesize a document and store it
///
/// The format and the request fields are all checked before any encoder runs.
async fn generate_file(
    State(state): State<AppState>,
    Path(format): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<GenerateFileRequest>, JsonRejection>,
) -> Result<Json<GenerateFileResponse>, ApiError> {
    let format: DocumentFormat = format.parse().map_err(core_error)?;
    let Json(req) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let filename = req
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Filename is required"))?;
    validate_filename(&filename).map_err(core_error)?;
    let content = req
        .content
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Content is required"))?;

    // encoders are CPU-bound; keep them off the async workers
    let bytes = tokio::task::spawn_blocking(move || document::synthesize(format, &content))
        .await
        .map_err(|e| core_error(Error::generation(e)))?
        .map_err(core_error)?;
    let host_url = request_host_url(&state, &headers);
    let artifact = state
        .file_store()
        .save(&bytes, &filename, &host_url)
        .await
        .map_err(core_error)?;

    info!(
        "Generated {} file {} ({} bytes)",
        format,
        artifact.relative_path,
        bytes.len()
    );

    Ok(Json(GenerateFileResponse {
        url: artifact.public_url,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate/{format}", post(generate_file))
}
