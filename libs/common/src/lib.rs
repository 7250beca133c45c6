//! Common library for the Still Strava backend
//!
//! This crate provides the infrastructure shared by the services: PostgreSQL
//! connection pooling, migration running, and the database error taxonomy.

pub mod database;
pub mod error;
