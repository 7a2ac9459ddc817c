/// Error types for the hobbyhub service
///
/// Every resolver either returns the mutated document or fails with one of
/// these variants; they surface in the GraphQL error list with a stable
/// `extensions.code`.
use async_graphql::ErrorExtensions;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Caller is anonymous or presented an invalid/expired token.
    #[error("Could not authenticate user.")]
    Unauthenticated,

    /// Caller is authenticated but does not own the resource.
    #[error("You can only modify your own {0}!")]
    Forbidden(&'static str),

    #[error("You can't like your own post!")]
    SelfLike,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    /// Unique constraint hit on registration or profile update.
    #[error("{0}")]
    Conflict(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code exposed in GraphQL extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::Forbidden(_) | AppError::SelfLike => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "BAD_USER_INPUT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", self.code()))
    }
}
