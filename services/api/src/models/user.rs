//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
///
/// The password hash is never serialized into a response representation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public representation returned by the API
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            bio: self.bio.clone(),
            location: self.location.clone(),
            website: self.website.clone(),
            instagram: self.instagram.clone(),
            twitter: self.twitter.clone(),
            created_at: self.created_at,
        }
    }

    /// Short representation used when embedding users in other resources
    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            image: self.image.clone(),
        }
    }
}

/// Public user fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Embedded user reference (author, liker)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub image: Option<String>,
}

/// Request for user signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Allow-listed fields a PATCH may change; absent fields are untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "trailblazer".to_string(),
            email: "trail@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            image: None,
            bio: Some("I like moss".to_string()),
            location: None,
            website: None,
            instagram: None,
            twitter: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = sample_user();

        let entity = serde_json::to_value(&user).unwrap();
        assert!(entity.get("password_hash").is_none());

        let response = serde_json::to_value(user.to_response()).unwrap();
        assert!(response.get("password_hash").is_none());
        assert_eq!(response["username"], "trailblazer");
    }

    #[test]
    fn test_update_user_ignores_unknown_keys() {
        let update: UpdateUser = serde_json::from_str(
            r#"{"bio": "new bio", "password_hash": "sneaky", "id": 999}"#,
        )
        .unwrap();

        assert_eq!(update.bio.as_deref(), Some("new bio"));
        assert!(update.username.is_none());
    }
}
