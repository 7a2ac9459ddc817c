/// Business logic layer
///
/// Services own the pool and enforce validation, authentication and the
/// ownership policy before touching the repositories. Resolvers stay thin.
pub mod auth;
pub mod comments;
pub mod posts;
pub mod users;

pub use auth::AuthService;
pub use comments::CommentService;
pub use posts::PostService;
pub use users::UserService;
