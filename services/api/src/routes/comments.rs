//! Comment CRUD endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{NewComment, UpdateComment},
    state::AppState,
    validation,
};

/// Get all comments
pub async fn list_comments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let comments = state.comments.list().await.map_err(|e| {
        error!("Failed to list comments: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(comments))
}

/// Create a comment (bearer protected; author = token subject)
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<NewComment>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_comment_content(&payload.content).map_err(ApiError::Validation)?;

    let comment = state
        .comments
        .create(auth.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to create comment: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("activity"))?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Get a comment by ID
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .comments
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get comment: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("comment"))?;

    Ok(Json(comment))
}

/// Update a comment's content
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateComment>,
) -> ApiResult<impl IntoResponse> {
    if let Some(content) = &update.content {
        validation::validate_comment_content(content).map_err(ApiError::Validation)?;
    }

    let comment = state
        .comments
        .update(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update comment: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("comment"))?;

    Ok(Json(comment))
}

/// Delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.comments.delete(id).await.map_err(|e| {
        error!("Failed to delete comment: {}", e);
        ApiError::Internal
    })?;

    if !deleted {
        return Err(ApiError::NotFound("comment"));
    }

    Ok(StatusCode::NO_CONTENT)
}
