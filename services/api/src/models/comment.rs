//! Comment model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// Comment entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub datetime: DateTime<Utc>,
    pub activity_id: i64,
    pub user_id: i64,
}

/// New comment creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub activity_id: i64,
}

/// Allow-listed fields a PATCH may change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComment {
    pub content: Option<String>,
}

/// Comment with its author resolved, as embedded in activity views
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub content: String,
    pub datetime: DateTime<Utc>,
    pub user: UserSummary,
}
