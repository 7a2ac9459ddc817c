/// Hobbyhub service library
///
/// GraphQL API for a social posting application: registration and login,
/// posts organized by category, comments and likes.
///
/// # Modules
///
/// - `schema`: GraphQL queries, mutations and wire types
/// - `services`: Business logic layer (auth, users, posts, comments)
/// - `db`: Database access layer and repositories
/// - `models`: Row-level data structures
/// - `security`: Password hashing, token issuance, ownership policy
/// - `validators`: Input shape and content-length validation
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod security;
pub mod services;
pub mod validators;

use sqlx::PgPool;

pub use config::Config;
pub use error::{AppError, Result};

/// Shared state handed to every GraphQL resolver.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: config::JwtConfig,
}
