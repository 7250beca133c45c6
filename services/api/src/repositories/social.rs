//! Social graph and like repository
//!
//! Duplicate follows and likes are rejected by unique constraints, not by a
//! check-then-insert: `ON CONFLICT DO NOTHING` with the affected-row count
//! keeps concurrent duplicates from racing past each other.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::User;

/// Repository for follow edges and likes
#[derive(Clone)]
pub struct SocialRepository {
    pool: PgPool,
}

impl SocialRepository {
    /// Create a new social repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a follow edge; false when the edge already exists
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        info!("User {} follows user {}", follower_id, followed_id);

        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followed_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a follow edge; false when no edge existed
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        info!("User {} unfollows user {}", follower_id, followed_id);

        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower_id)
                .bind(followed_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Users following the given user
    pub async fn followers(&self, user_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            JOIN follows f ON f.follower_id = u.id
            WHERE f.followed_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Users the given user follows
    pub async fn following(&self, user_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            JOIN follows f ON f.followed_id = u.id
            WHERE f.follower_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Insert a like; false when the user already liked the activity
    pub async fn like(&self, user_id: i64, activity_id: i64) -> Result<bool> {
        info!("User {} likes activity {}", user_id, activity_id);

        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, activity_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, activity_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(activity_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a like; false when no like existed
    pub async fn unlike(&self, user_id: i64, activity_id: i64) -> Result<bool> {
        info!("User {} unlikes activity {}", user_id, activity_id);

        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND activity_id = $2")
            .bind(user_id)
            .bind(activity_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
