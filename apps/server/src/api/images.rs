use std::sync::Arc;

use crate::{
    auth::Requester,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use pure_hearts_core::images::{encode_to_budget, ImageEncodingJob, ImagePreset, WebpCodec};
use serde::Deserialize;
use tokio::task;

/// Largest upload accepted for optimization.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeQuery {
    preset: Option<ImagePreset>,
    max_bytes: Option<usize>,
}

async fn optimize_image(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    Query(query): Query<OptimizeQuery>,
    body: Bytes,
) -> ApiResult<Response> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Request body is empty".to_string()));
    }

    let preset = query.preset.unwrap_or(ImagePreset::ProjectBackground);
    let max_bytes = query.max_bytes.unwrap_or(state.image_max_bytes);
    let job = ImageEncodingJob::new(body.to_vec(), preset.dimensions(), max_bytes);
    tracing::debug!(
        "Optimizing {} byte upload for {} as {:?} within {} bytes",
        body.len(),
        requester.user_id,
        preset,
        max_bytes
    );

    let encoded = task::spawn_blocking(move || encode_to_budget(&WebpCodec, &job))
        .await
        .map_err(|e| ApiError::Internal(format!("Image encoding task failed: {e}")))??;

    if !encoded.within_budget(max_bytes) {
        tracing::info!(
            "Image stayed above budget at quality {} ({} > {} bytes)",
            encoded.final_quality,
            encoded.final_size,
            max_bytes
        );
    }

    let headers = [
        (header::CONTENT_TYPE, "image/webp".to_string()),
        (
            HeaderName::from_static("x-image-quality"),
            encoded.final_quality.to_string(),
        ),
        (
            HeaderName::from_static("x-image-width"),
            encoded.final_dimensions.width.to_string(),
        ),
        (
            HeaderName::from_static("x-image-height"),
            encoded.final_dimensions.height.to_string(),
        ),
    ];
    Ok((headers, encoded.bytes).into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images/optimize", post(optimize_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
