/// Ownership policy
///
/// Single authorization decision point for every mutation that touches an
/// existing post, comment or user record. The resource's stored author field
/// must match the caller's username.
use crate::error::{AppError, Result};
use crate::security::Identity;

/// Allow the operation only when the caller owns the resource.
pub fn ensure_owner(identity: &Identity, owner_username: &str, resource: &'static str) -> Result<()> {
    if identity.username == owner_username {
        Ok(())
    } else {
        Err(AppError::Forbidden(resource))
    }
}

/// Allow the operation only when the caller is the addressed user.
pub fn ensure_self(identity: &Identity, user_id: uuid::Uuid) -> Result<()> {
    if identity.id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("account"))
    }
}
