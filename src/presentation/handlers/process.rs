use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ContentExtractor, LayoutDetector};
use crate::application::services::PipelineError;
use crate::domain::PipelineStatus;
use crate::presentation::state::AppState;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Deserialize)]
pub struct ProcessParams {
    pub max_segments: Option<usize>,
    pub min_height: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
    pub status: PipelineStatus,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_handler<L, E>(
    State(state): State<AppState<L, E>>,
    params: Result<Query<ProcessParams>, QueryRejection>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    L: LayoutDetector + 'static,
    E: ContentExtractor + 'static,
{
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected query parameters");
            return error_response(
                StatusCode::BAD_REQUEST,
                "invalid_input",
                rejection.body_text(),
            );
        }
    };

    let image = match read_image(&mut multipart).await {
        Ok(image) => image,
        Err((status, detail)) => {
            tracing::warn!(detail = %detail, "Rejected upload");
            return error_response(status, "invalid_input", detail);
        }
    };

    let max_segments = params
        .max_segments
        .unwrap_or(state.pipeline.default_max_segments);
    let min_height = params
        .min_height
        .unwrap_or(state.pipeline.default_min_height);

    tracing::debug!(bytes = image.len(), max_segments, min_height, "Image received");

    match state
        .pipeline_service
        .run(&image, max_segments, min_height)
        .await
    {
        Ok(result) => {
            tracing::info!(
                total_segments = result.total_segments,
                status = %result.status,
                elapsed_ms = result.elapsed_ms,
                "Document processed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e @ (PipelineError::InvalidInput(_) | PipelineError::InvalidImage(_))) => {
            tracing::warn!(error = %e, "Invalid processing request");
            error_response(StatusCode::BAD_REQUEST, "invalid_input", e.to_string())
        }
        Err(e @ PipelineError::UpstreamUnavailable(_)) => {
            tracing::error!(error = %e, "Layout backend unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "upstream_unavailable",
                e.to_string(),
            )
        }
        Err(e @ PipelineError::Internal(_)) => {
            tracing::error!(error = %e, "Processing failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    }
}

async fn read_image(multipart: &mut Multipart) -> Result<Bytes, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read multipart: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let is_image = field
            .content_type()
            .is_some_and(|content_type| content_type.starts_with("image/"));
        if !is_image {
            return Err((
                StatusCode::BAD_REQUEST,
                "File must be an image (JPEG, PNG, etc.)".to_string(),
            ));
        }

        return field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read file: {e}")));
    }

    Err((StatusCode::BAD_REQUEST, "No image uploaded".to_string()))
}

fn error_response(status: StatusCode, code: &str, detail: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail,
            code: code.to_string(),
            status: PipelineStatus::Failed,
        }),
    )
        .into_response()
}
