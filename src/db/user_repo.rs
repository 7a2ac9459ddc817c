use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Create a new user with an already-hashed password
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get all users
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM users
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Get a single user by ID
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get a single user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get a single user by email (login lookup)
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Overwrite a user's username and email
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = $1, email = $2
        WHERE id = $3
        RETURNING id, username, email, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Overwrite a user's password hash, keyed by id plus the email-match filter
pub async fn update_password(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    password_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET password_hash = $1
        WHERE id = $2 AND email = $3
        RETURNING id, username, email, password_hash, created_at
        "#,
    )
    .bind(password_hash)
    .bind(user_id)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
