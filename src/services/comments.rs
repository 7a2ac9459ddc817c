/// Comment service - append, edit and remove comments on posts
///
/// Every mutation returns the refreshed parent post, matching the wire
/// contract where comment operations resolve to the post.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, Post};
use crate::security::{policy, Identity};
use crate::validators;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all comments for a post, in insertion order
    pub async fn get_post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        Ok(comment_repo::get_comments_by_post(&self.pool, post_id).await?)
    }

    /// Append a comment authored by the caller
    pub async fn add_comment(
        &self,
        identity: &Identity,
        post_id: Uuid,
        comment_text: &str,
    ) -> Result<Post> {
        validators::validate_comment_text(comment_text)?;
        self.require_post(post_id).await?;

        comment_repo::create_comment(&self.pool, post_id, comment_text, &identity.username)
            .await?;

        self.require_post(post_id).await
    }

    /// Replace a comment's text. Only the comment's author may edit.
    pub async fn update_comment(
        &self,
        identity: &Identity,
        post_id: Uuid,
        comment_id: Uuid,
        comment_text: &str,
    ) -> Result<Post> {
        validators::validate_comment_text(comment_text)?;

        let comment = self.require_comment(post_id, comment_id).await?;
        policy::ensure_owner(identity, &comment.comment_author, "comments")?;

        comment_repo::update_comment(&self.pool, comment_id, comment_text).await?;

        self.require_post(post_id).await
    }

    /// Remove a comment from its post. Only the comment's author may
    /// remove it; a non-owner attempt leaves the store unchanged.
    pub async fn remove_comment(
        &self,
        identity: &Identity,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Post> {
        let comment = self.require_comment(post_id, comment_id).await?;
        policy::ensure_owner(identity, &comment.comment_author, "comments")?;

        comment_repo::delete_comment(&self.pool, comment_id).await?;

        self.require_post(post_id).await
    }

    async fn require_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::get_post(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound("Post"))
    }

    async fn require_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment> {
        comment_repo::get_comment(&self.pool, post_id, comment_id)
            .await?
            .ok_or(AppError::NotFound("Comment"))
    }
}
