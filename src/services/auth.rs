/// Auth service - registration, login and password changes
///
/// Hashing happens here, explicitly, rather than in a hidden store-level
/// pre-save hook: both `register` and `change_password` take plaintext and
/// persist only the argon2 hash.
use sqlx::PgPool;

use crate::config::JwtConfig;
use crate::db::{self, user_repo};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{self, policy, Identity};
use crate::validators;

pub struct AuthService {
    pool: PgPool,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self { pool, jwt }
    }

    /// Create a user and issue an identity token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, User)> {
        validators::validate_username(username)?;
        validators::validate_email(email)?;
        validators::validate_password(password)?;

        let password_hash = security::hash_password(password)?;

        let user = user_repo::create_user(&self.pool, username, email, &password_hash)
            .await
            .map_err(|e| {
                if db::is_unique_violation(&e) {
                    AppError::Conflict("Username or email already in use")
                } else {
                    AppError::Database(e)
                }
            })?;

        let token = security::sign_token(&user, &self.jwt.secret, self.jwt.expiry_secs)?;
        tracing::info!(username = %user.username, "user registered");

        Ok((token, user))
    }

    /// Verify credentials and issue an identity token.
    ///
    /// A missing user and a wrong password fail identically, so the response
    /// does not reveal which emails are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let user = user_repo::find_by_email(&self.pool, email)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if !security::verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthenticated);
        }

        let token = security::sign_token(&user, &self.jwt.secret, self.jwt.expiry_secs)?;

        Ok((token, user))
    }

    /// Overwrite the caller's password. The update is keyed by id plus the
    /// email-match filter, so a stale email yields no row and no change.
    pub async fn change_password(
        &self,
        identity: &Identity,
        user_id: uuid::Uuid,
        email: &str,
        password: &str,
    ) -> Result<User> {
        policy::ensure_self(identity, user_id)?;
        validators::validate_password(password)?;

        let password_hash = security::hash_password(password)?;

        user_repo::update_password(&self.pool, user_id, email, &password_hash)
            .await?
            .ok_or(AppError::NotFound("No user found with this id and email"))
    }
}
