//! Repositories for database operations

pub mod activity;
pub mod comment;
pub mod social;
pub mod user;

pub use activity::ActivityRepository;
pub use comment::CommentRepository;
pub use social::SocialRepository;
pub use user::UserRepository;
