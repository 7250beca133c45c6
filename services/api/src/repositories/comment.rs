//! Comment repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::{Comment, NewComment, UpdateComment};

/// Comment repository
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment; returns None when the referenced activity is missing
    pub async fn create(&self, user_id: i64, new: &NewComment) -> Result<Option<Comment>> {
        info!(
            "Creating comment on activity {} by user {}",
            new.activity_id, user_id
        );

        let activity_exists = sqlx::query("SELECT 1 FROM activities WHERE id = $1")
            .bind(new.activity_id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();

        if !activity_exists {
            return Ok(None);
        }

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, activity_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.content)
        .bind(new.activity_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(comment))
    }

    /// Get all comments
    pub async fn list(&self) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>("SELECT * FROM comments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(comments)
    }

    /// Find a comment by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    /// Apply a partial update
    pub async fn update(&self, id: i64, update: &UpdateComment) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = COALESCE($2, content)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Delete a comment
    pub async fn delete(&self, id: i64) -> Result<bool> {
        info!("Deleting comment: {}", id);

        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
