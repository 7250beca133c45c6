//! Multipart image upload endpoint

use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Maximum accepted image size
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Upload an image (bearer protected, multipart)
///
/// Accepts the first image part of the request, writes it to the upload
/// directory under a generated name, and returns the relative URL it is
/// served from.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Malformed multipart body".into()))?
    {
        let Some(content_type) = field.content_type().map(str::to_string) else {
            continue;
        };

        let Some(extension) = extension_for_content_type(&content_type) else {
            return Err(ApiError::Validation(format!(
                "Unsupported image type: {}",
                content_type
            )));
        };

        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::BadRequest("Failed to read image data".into()))?;

        if data.is_empty() {
            return Err(ApiError::Validation("Image is empty".into()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::Validation("Image exceeds 5 MiB".into()));
        }

        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let path = std::path::Path::new(&state.config.upload_dir).join(&filename);

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| {
                error!("Failed to create upload directory: {}", e);
                ApiError::Internal
            })?;

        tokio::fs::write(&path, &data).await.map_err(|e| {
            error!("Failed to write uploaded image: {}", e);
            ApiError::Internal
        })?;

        info!("Stored uploaded image: {}", filename);

        return Ok(Json(json!({
            "url": format!("/uploads/{}", filename),
        })));
    }

    Err(ApiError::BadRequest("No image part in request".into()))
}

/// File extension for a supported image content type
fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_content_type("image/png"), Some("png"));
        assert_eq!(extension_for_content_type("image/webp"), Some("webp"));

        assert_eq!(extension_for_content_type("text/html"), None);
        assert_eq!(extension_for_content_type("application/pdf"), None);
    }
}
