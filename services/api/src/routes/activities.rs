//! Activity feed, CRUD, and like endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{NewActivity, UpdateActivity},
    state::AppState,
    validation,
};

/// Query parameters for feed reads; `user_id` is the viewer
#[derive(Deserialize)]
pub struct FeedParams {
    pub user_id: Option<i64>,
}

/// List activities, optionally filtered to a viewer's timeline
///
/// With `user_id`, only activities authored by that user or by accounts they
/// follow are returned. Each entry carries like annotations and comments.
pub async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> ApiResult<impl IntoResponse> {
    let views = state.activities.feed(params.user_id).await.map_err(|e| {
        error!("Failed to compose activity feed: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(views))
}

/// Create an activity (bearer protected; author = token subject)
pub async fn create_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<NewActivity>,
) -> ApiResult<impl IntoResponse> {
    validate_new_activity(&payload)?;

    let activity = state
        .activities
        .create(auth.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to create activity: {}", e);
            ApiError::Internal
        })?;

    let view = state
        .activities
        .view_by_id(activity.id, Some(auth.id))
        .await
        .map_err(|e| {
            error!("Failed to load created activity: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::Internal)?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Get an annotated activity by ID
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<FeedParams>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .activities
        .view_by_id(id, params.user_id)
        .await
        .map_err(|e| {
            error!("Failed to get activity: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("activity"))?;

    Ok(Json(view))
}

/// Update allow-listed activity fields
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateActivity>,
) -> ApiResult<impl IntoResponse> {
    if let Some(title) = &update.title {
        validation::validate_title(title).map_err(ApiError::Validation)?;
    }
    if let Some(activity_type) = &update.activity_type {
        validation::validate_activity_type(activity_type).map_err(ApiError::Validation)?;
    }
    if let Some(description) = &update.description {
        validation::validate_description(description).map_err(ApiError::Validation)?;
    }
    if let Some(location_name) = &update.location_name {
        validation::validate_location_name(location_name).map_err(ApiError::Validation)?;
    }
    validation::validate_coordinates(update.latitude, update.longitude)
        .map_err(ApiError::Validation)?;

    state
        .activities
        .update(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update activity: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("activity"))?;

    let view = state
        .activities
        .view_by_id(id, None)
        .await
        .map_err(|e| {
            error!("Failed to load updated activity: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("activity"))?;

    Ok(Json(view))
}

/// Delete an activity
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.activities.delete(id).await.map_err(|e| {
        error!("Failed to delete activity: {}", e);
        ApiError::Internal
    })?;

    if !deleted {
        return Err(ApiError::NotFound("activity"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Like an activity (bearer protected)
pub async fn like_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state
        .activities
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to look up activity: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("activity"))?;

    let created = state.social.like(auth.id, id).await.map_err(|e| {
        error!("Failed to create like: {}", e);
        ApiError::Internal
    })?;

    if !created {
        return Err(ApiError::BadRequest("Already liked this activity".into()));
    }

    let view = refreshed_view(&state, id, auth.id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Remove a like from an activity (bearer protected)
pub async fn unlike_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let removed = state.social.unlike(auth.id, id).await.map_err(|e| {
        error!("Failed to remove like: {}", e);
        ApiError::Internal
    })?;

    if !removed {
        return Err(ApiError::NotFound("like"));
    }

    let view = refreshed_view(&state, id, auth.id).await?;
    Ok(Json(view))
}

async fn refreshed_view(
    state: &AppState,
    activity_id: i64,
    viewer: i64,
) -> ApiResult<crate::models::ActivityView> {
    state
        .activities
        .view_by_id(activity_id, Some(viewer))
        .await
        .map_err(|e| {
            error!("Failed to load activity view: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("activity"))
}

fn validate_new_activity(payload: &NewActivity) -> ApiResult<()> {
    validation::validate_title(&payload.title).map_err(ApiError::Validation)?;
    validation::validate_activity_type(&payload.activity_type).map_err(ApiError::Validation)?;
    validation::validate_description(&payload.description).map_err(ApiError::Validation)?;
    if let Some(location_name) = &payload.location_name {
        validation::validate_location_name(location_name).map_err(ApiError::Validation)?;
    }
    validation::validate_coordinates(payload.latitude, payload.longitude)
        .map_err(ApiError::Validation)?;

    Ok(())
}
