/// Database access layer
///
/// Thin async repositories over `PgPool`. Each function is a single SQL
/// statement; atomicity comes from the statement itself, never from
/// in-process coordination.
pub mod category_repo;
pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;

/// Postgres error code for unique constraint violations.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Whether a sqlx error is a unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}
