//! Generated file download endpoint

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use filegen_core::store::PUBLIC_PREFIX;

use super::{core_error, ApiError};
use crate::state::AppState;

/// GET /static/generated_files/{filename} - Raw artifact bytes
async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .file_store()
        .fetch(&filename)
        .await
        .map_err(core_error)?;
    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

pub fn router() -> Router<AppState> {
    Router::new().route(&format!("/{}/{{filename}}", PUBLIC_PREFIX), get(serve_file))
}
