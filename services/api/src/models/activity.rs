//! Activity model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::comment::CommentView;
use crate::models::user::UserSummary;

/// Activity entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub activity_type: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub photos: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// New activity creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub title: String,
    pub activity_type: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub photos: Option<String>,
}

/// Allow-listed fields a PATCH may change; absent fields are untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivity {
    pub title: Option<String>,
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub photos: Option<String>,
}

/// Feed representation of an activity: the row plus its author, like
/// annotations, and comments
#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    pub id: i64,
    pub title: String,
    pub activity_type: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub photos: Option<String>,
    pub user: UserSummary,
    pub like_count: i64,
    pub liked_by: Vec<UserSummary>,
    pub user_liked: bool,
    pub comments: Vec<CommentView>,
}
