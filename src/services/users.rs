/// User service - profile reads and updates
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{self, user_repo};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{policy, Identity};
use crate::validators;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all users
    pub async fn list(&self) -> Result<Vec<User>> {
        Ok(user_repo::list_users(&self.pool).await?)
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(user_repo::find_by_username(&self.pool, username).await?)
    }

    /// Get the caller's own user document
    pub async fn me(&self, identity: &Identity) -> Result<User> {
        user_repo::find_by_id(&self.pool, identity.id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }

    /// Overwrite the caller's username and email. Callers may only update
    /// their own account.
    pub async fn update_profile(
        &self,
        identity: &Identity,
        user_id: Uuid,
        username: &str,
        email: &str,
    ) -> Result<User> {
        policy::ensure_self(identity, user_id)?;
        validators::validate_username(username)?;
        validators::validate_email(email)?;

        let user = user_repo::update_profile(&self.pool, user_id, username, email)
            .await
            .map_err(|e| {
                if db::is_unique_violation(&e) {
                    AppError::Conflict("Username or email already in use")
                } else {
                    AppError::Database(e)
                }
            })?;

        user.ok_or(AppError::NotFound("User"))
    }
}
