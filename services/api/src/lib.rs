//! Still Strava API service
//!
//! A social activity-sharing backend: users post outdoor activities, follow
//! each other, comment on and like posts. Exposed as a REST API over
//! PostgreSQL.

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

/// Embedded migrations for the service schema
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
