//! Request, response, and entity models

pub mod activity;
pub mod comment;
pub mod user;

pub use activity::{Activity, ActivityView, NewActivity, UpdateActivity};
pub use comment::{Comment, CommentView, NewComment, UpdateComment};
pub use user::{LoginRequest, SignupRequest, UpdateUser, User, UserResponse, UserSummary};
