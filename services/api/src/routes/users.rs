//! User CRUD, search, and social graph endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{
    error::{ApiError, ApiResult, is_unique_violation},
    middleware::AuthUser,
    models::{UpdateUser, UserResponse},
    routes::auth::create_user_record,
    state::AppState,
    validation,
};

/// Query parameters for user search
#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.users.list().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        ApiError::Internal
    })?;

    let users: Vec<UserResponse> = users.iter().map(|u| u.to_response()).collect();
    Ok(Json(users))
}

/// Create a user (same validation path as signup, without token issuance)
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<crate::models::SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = create_user_record(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(user.to_response())))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get user: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(user.to_response()))
}

/// Search users by username substring
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<impl IntoResponse> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter: q".into()))?;

    let users = state.users.search(&query).await.map_err(|e| {
        error!("Failed to search users: {}", e);
        ApiError::Internal
    })?;

    let users: Vec<UserResponse> = users.iter().map(|u| u.to_response()).collect();
    Ok(Json(users))
}

/// Update allow-listed user fields
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    if let Some(username) = &update.username {
        validation::validate_username(username).map_err(ApiError::Validation)?;
    }
    if let Some(email) = &update.email {
        validation::validate_email(email).map_err(ApiError::Validation)?;
    }

    let user = state
        .users
        .update(id, &update)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Validation("Username or email is already taken".into())
            } else {
                error!("Failed to update user: {}", e);
                ApiError::Internal
            }
        })?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(user.to_response()))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.users.delete(id).await.map_err(|e| {
        error!("Failed to delete user: {}", e);
        ApiError::Internal
    })?;

    if !deleted {
        return Err(ApiError::NotFound("user"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Follow a user (bearer protected; follower = token subject)
pub async fn follow_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if auth.id == id {
        return Err(ApiError::BadRequest("Cannot follow yourself".into()));
    }

    state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("user"))?;

    let created = state.social.follow(auth.id, id).await.map_err(|e| {
        error!("Failed to create follow edge: {}", e);
        ApiError::Internal
    })?;

    if !created {
        return Err(ApiError::BadRequest("Already following this user".into()));
    }

    Ok((StatusCode::CREATED, Json(json!({"message": "Followed"}))))
}

/// Unfollow a user (bearer protected)
pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let removed = state.social.unfollow(auth.id, id).await.map_err(|e| {
        error!("Failed to remove follow edge: {}", e);
        ApiError::Internal
    })?;

    if !removed {
        return Err(ApiError::BadRequest("Not following this user".into()));
    }

    Ok(Json(json!({"message": "Unfollowed"})))
}

/// Users following the given user
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("user"))?;

    let users = state.social.followers(id).await.map_err(|e| {
        error!("Failed to list followers: {}", e);
        ApiError::Internal
    })?;

    let users: Vec<UserResponse> = users.iter().map(|u| u.to_response()).collect();
    Ok(Json(users))
}

/// Users the given user follows
pub async fn following(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound("user"))?;

    let users = state.social.following(id).await.map_err(|e| {
        error!("Failed to list following: {}", e);
        ApiError::Internal
    })?;

    let users: Vec<UserResponse> = users.iter().map(|u| u.to_response()).collect();
    Ok(Json(users))
}
