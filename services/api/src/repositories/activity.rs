//! Activity repository and feed composition

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{
    Activity, ActivityView, CommentView, NewActivity, UpdateActivity, UserSummary,
};

/// Number of liking users embedded per activity
const LIKER_PREVIEW_LIMIT: usize = 5;

/// Activity repository
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new activity owned by a user
    pub async fn create(&self, user_id: i64, new: &NewActivity) -> Result<Activity> {
        info!("Creating activity '{}' for user {}", new.title, user_id);

        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities
                (title, activity_type, description, latitude, longitude,
                 location_name, datetime, photos, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&new.title)
        .bind(&new.activity_type)
        .bind(&new.description)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(&new.location_name)
        .bind(new.datetime)
        .bind(&new.photos)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    /// Find an activity by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(activity)
    }

    /// List activities newest first
    ///
    /// With a viewer, the timeline is restricted to activities authored by the
    /// viewer or by accounts the viewer follows.
    pub async fn list(&self, viewer: Option<i64>) -> Result<Vec<Activity>> {
        let activities = match viewer {
            Some(viewer_id) => {
                sqlx::query_as::<_, Activity>(
                    r#"
                    SELECT * FROM activities
                    WHERE user_id = $1
                       OR user_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
                    ORDER BY id DESC
                    "#,
                )
                .bind(viewer_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Activity>("SELECT * FROM activities ORDER BY id DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(activities)
    }

    /// Apply a partial update; fields absent from the payload are untouched
    pub async fn update(&self, id: i64, update: &UpdateActivity) -> Result<Option<Activity>> {
        info!("Updating activity: {}", id);

        let activity = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET title = COALESCE($2, title),
                activity_type = COALESCE($3, activity_type),
                description = COALESCE($4, description),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                location_name = COALESCE($7, location_name),
                datetime = COALESCE($8, datetime),
                photos = COALESCE($9, photos)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.activity_type)
        .bind(&update.description)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(&update.location_name)
        .bind(update.datetime)
        .bind(&update.photos)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    /// Delete an activity; cascades to its comments and likes
    pub async fn delete(&self, id: i64) -> Result<bool> {
        info!("Deleting activity: {}", id);

        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Annotated view of a single activity, or None if it does not exist
    pub async fn view_by_id(&self, id: i64, viewer: Option<i64>) -> Result<Option<ActivityView>> {
        let Some(activity) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut views = self.compose_views(vec![activity], viewer).await?;
        Ok(views.pop())
    }

    /// Annotated feed for a viewer
    pub async fn feed(&self, viewer: Option<i64>) -> Result<Vec<ActivityView>> {
        let activities = self.list(viewer).await?;
        self.compose_views(activities, viewer).await
    }

    /// Shape activity rows into feed views: resolve authors, attach like
    /// counts, a liker preview, the viewer's own like state, and comments.
    async fn compose_views(
        &self,
        activities: Vec<Activity>,
        viewer: Option<i64>,
    ) -> Result<Vec<ActivityView>> {
        if activities.is_empty() {
            return Ok(vec![]);
        }

        let activity_ids: Vec<i64> = activities.iter().map(|a| a.id).collect();
        let author_ids: Vec<i64> = activities.iter().map(|a| a.user_id).collect();

        let authors = self.fetch_authors(&author_ids).await?;
        let likes_by_activity = self.fetch_likes(&activity_ids).await?;
        let comments_by_activity = self.fetch_comments(&activity_ids).await?;

        let views = activities
            .into_iter()
            .map(|activity| {
                let user = authors.get(&activity.user_id).cloned().unwrap_or_else(|| {
                    // FK guarantees the author exists; this only trips on a
                    // concurrent delete between the two queries.
                    UserSummary {
                        id: activity.user_id,
                        username: String::new(),
                        image: None,
                    }
                });

                let likers = likes_by_activity.get(&activity.id);
                let like_count = likers.map_or(0, |l| l.len()) as i64;
                let user_liked = match viewer {
                    Some(viewer_id) => {
                        likers.is_some_and(|l| l.iter().any(|liker| liker.id == viewer_id))
                    }
                    None => false,
                };
                let liked_by = likers
                    .map(|l| l.iter().take(LIKER_PREVIEW_LIMIT).cloned().collect())
                    .unwrap_or_default();

                let comments = comments_by_activity
                    .get(&activity.id)
                    .cloned()
                    .unwrap_or_default();

                ActivityView {
                    id: activity.id,
                    title: activity.title,
                    activity_type: activity.activity_type,
                    description: activity.description,
                    latitude: activity.latitude,
                    longitude: activity.longitude,
                    location_name: activity.location_name,
                    datetime: activity.datetime,
                    photos: activity.photos,
                    user,
                    like_count,
                    liked_by,
                    user_liked,
                    comments,
                }
            })
            .collect();

        Ok(views)
    }

    async fn fetch_authors(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserSummary>> {
        let rows = sqlx::query("SELECT id, username, image FROM users WHERE id = ANY($1)")
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?;

        let authors = rows
            .into_iter()
            .map(|row| {
                let summary = UserSummary {
                    id: row.get("id"),
                    username: row.get("username"),
                    image: row.get("image"),
                };
                (summary.id, summary)
            })
            .collect();

        Ok(authors)
    }

    /// All likers per activity, oldest like first
    async fn fetch_likes(&self, activity_ids: &[i64]) -> Result<HashMap<i64, Vec<UserSummary>>> {
        let rows = sqlx::query(
            r#"
            SELECT l.activity_id, u.id, u.username, u.image
            FROM likes l
            JOIN users u ON u.id = l.user_id
            WHERE l.activity_id = ANY($1)
            ORDER BY l.created_at, l.id
            "#,
        )
        .bind(activity_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut likes: HashMap<i64, Vec<UserSummary>> = HashMap::new();
        for row in rows {
            let activity_id: i64 = row.get("activity_id");
            likes.entry(activity_id).or_default().push(UserSummary {
                id: row.get("id"),
                username: row.get("username"),
                image: row.get("image"),
            });
        }

        Ok(likes)
    }

    async fn fetch_comments(&self, activity_ids: &[i64]) -> Result<HashMap<i64, Vec<CommentView>>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.content, c.datetime, c.activity_id,
                   u.id AS author_id, u.username, u.image
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.activity_id = ANY($1)
            ORDER BY c.datetime, c.id
            "#,
        )
        .bind(activity_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut comments: HashMap<i64, Vec<CommentView>> = HashMap::new();
        for row in rows {
            let activity_id: i64 = row.get("activity_id");
            let datetime: DateTime<Utc> = row.get("datetime");
            comments.entry(activity_id).or_default().push(CommentView {
                id: row.get("id"),
                content: row.get("content"),
                datetime,
                user: UserSummary {
                    id: row.get("author_id"),
                    username: row.get("username"),
                    image: row.get("image"),
                },
            });
        }

        Ok(comments)
    }
}
