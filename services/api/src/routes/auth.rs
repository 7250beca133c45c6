//! Signup, login, and current-user endpoints

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult, is_unique_violation},
    middleware::AuthUser,
    models::{LoginRequest, SignupRequest, User, UserResponse},
    state::AppState,
    validation,
};

/// Response for signup and login
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserResponse,
}

/// User signup endpoint
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = create_user_record(&state, payload).await?;

    let token = state.jwt_service.issue(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::Internal
    })?;

    info!("New signup: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            user: user.to_response(),
        }),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::BadRequest("Email and password are required".into())),
    };

    let user = state
        .users
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::Unauthorized)?;

    let valid = state.users.verify_password(&user, &password).map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::Internal
    })?;

    if !valid {
        return Err(ApiError::Unauthorized);
    }

    let token = state.jwt_service.issue(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(TokenResponse {
        token,
        user: user.to_response(),
    }))
}

/// Current user endpoint (bearer protected)
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_id(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        // Token subject no longer exists, e.g. the account was deleted.
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(user.to_response()))
}

/// Validate a signup payload and persist the user
///
/// Shared by `POST /signup` and `POST /users`.
pub(crate) async fn create_user_record(
    state: &AppState,
    payload: SignupRequest,
) -> ApiResult<User> {
    let (username, email, password) = match (payload.username, payload.email, payload.password) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        _ => {
            return Err(ApiError::BadRequest(
                "Username, email, and password are required".into(),
            ));
        }
    };

    validation::validate_username(&username).map_err(ApiError::Validation)?;
    validation::validate_email(&email).map_err(ApiError::Validation)?;
    validation::validate_password(&password).map_err(ApiError::Validation)?;

    if state
        .users
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            ApiError::Internal
        })?
        .is_some()
    {
        return Err(ApiError::Validation("Email is already registered".into()));
    }

    state
        .users
        .create(&username, &email, &password, payload.image.as_deref())
        .await
        .map_err(|e| {
            // The pre-check above is advisory; the unique constraints are the
            // authority under concurrent signups.
            if is_unique_violation(&e) {
                ApiError::Validation("Username or email is already taken".into())
            } else {
                error!("Failed to create user: {}", e);
                ApiError::Internal
            }
        })
}
