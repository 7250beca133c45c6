//! Application state shared across handlers

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::jwt::JwtService;
use crate::repositories::{ActivityRepository, CommentRepository, SocialRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub users: UserRepository,
    pub activities: ActivityRepository,
    pub comments: CommentRepository,
    pub social: SocialRepository,
    pub config: AppConfig,
}

impl AppState {
    /// Build the state from a connection pool and configuration
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_token_expiry);

        AppState {
            users: UserRepository::new(pool.clone()),
            activities: ActivityRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            social: SocialRepository::new(pool.clone()),
            db_pool: pool,
            jwt_service,
            config,
        }
    }
}
