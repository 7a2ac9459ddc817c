/// Post service - creation, retrieval, ownership-guarded mutation and likes
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{category_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::security::{policy, Identity};
use crate::validators;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::get_post(&self.pool, post_id).await?)
    }

    /// List posts, optionally filtered by author, newest first
    pub async fn list_posts(&self, author: Option<&str>) -> Result<Vec<Post>> {
        let posts = match author {
            Some(author) => post_repo::list_posts_by_author(&self.pool, author).await?,
            None => post_repo::list_posts(&self.pool).await?,
        };
        Ok(posts)
    }

    /// Create a post authored by the caller
    pub async fn create_post(
        &self,
        identity: &Identity,
        post_title: &str,
        post_desc: &str,
        category_id: Option<Uuid>,
    ) -> Result<Post> {
        validators::validate_post_title(post_title)?;
        validators::validate_post_desc(post_desc)?;

        if let Some(category_id) = category_id {
            category_repo::find_by_id(&self.pool, category_id)
                .await?
                .ok_or(AppError::NotFound("Category"))?;
        }

        let post = post_repo::create_post(
            &self.pool,
            post_title,
            post_desc,
            &identity.username,
            category_id,
        )
        .await?;

        tracing::info!(post_id = %post.id, author = %post.post_author, "post created");

        Ok(post)
    }

    /// Delete a post. Only the author may delete; a missing post is
    /// reported as not found rather than crashing on the absent row.
    pub async fn remove_post(&self, identity: &Identity, post_id: Uuid) -> Result<Post> {
        let post = self.require_post(post_id).await?;
        policy::ensure_owner(identity, &post.post_author, "posts")?;

        post_repo::delete_post(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound("Post"))
    }

    /// Ownership-checked fetch. The public surface keeps an update mutation
    /// that accepts only the post id and returns the post unchanged.
    pub async fn update_post(&self, identity: &Identity, post_id: Uuid) -> Result<Post> {
        let post = self.require_post(post_id).await?;
        policy::ensure_owner(identity, &post.post_author, "posts")?;

        Ok(post)
    }

    /// Overwrite a post's description. Only the author may edit.
    pub async fn edit_post(
        &self,
        identity: &Identity,
        post_id: Uuid,
        post_desc: &str,
    ) -> Result<Post> {
        validators::validate_post_desc(post_desc)?;

        let post = self.require_post(post_id).await?;
        policy::ensure_owner(identity, &post.post_author, "posts")?;

        post_repo::update_desc(&self.pool, post_id, post_desc)
            .await?
            .ok_or(AppError::NotFound("Post"))
    }

    /// Increment a post's like counter. Authors cannot like their own
    /// posts; a rejected self-like never mutates the store.
    pub async fn like_post(&self, identity: &Identity, post_id: Uuid) -> Result<Post> {
        let post = self.require_post(post_id).await?;

        if post.post_author == identity.username {
            return Err(AppError::SelfLike);
        }

        post_repo::increment_likes(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound("Post"))
    }

    async fn require_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::get_post(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound("Post"))
    }
}
