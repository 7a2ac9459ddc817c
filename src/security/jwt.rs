/// Identity token issuance and verification
///
/// Tokens are HS256 JWTs embedding the user's id, username, email and an
/// expiry. Verification happens once per request in the HTTP handler; an
/// absent or invalid token produces an anonymous request rather than a
/// transport-level rejection, since registration and login run
/// unauthenticated.
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::User;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: usize,
    /// Expiration time (unix seconds)
    pub exp: usize,
}

/// The authenticated caller, as seen by resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            id: claims.sub,
            username: claims.username,
            email: claims.email,
        }
    }
}

/// Sign an identity token for a user.
pub fn sign_token(user: &User, secret: &str, expiry_secs: i64) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        iat: now as usize,
        exp: (now + expiry_secs) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
}

/// Decode and validate an identity token.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthenticated)
}
