//! Post, comment and category schema

use async_graphql::{
    ComplexObject, Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject, ID,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models;
use crate::schema::{parse_id, require_identity};
use crate::services::{CommentService, PostService};
use crate::AppState;

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
#[graphql(complex)]
pub struct Post {
    #[graphql(name = "_id")]
    pub id: ID,
    pub post_title: String,
    pub post_desc: String,
    pub post_author: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    #[graphql(skip)]
    pub category_id: Option<Uuid>,
}

#[ComplexObject]
impl Post {
    /// Comments on this post, in the order the store returns them.
    async fn comments(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Comment>> {
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&self.id)?;

        let comments = CommentService::new(state.pool.clone())
            .get_post_comments(post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn category(&self, ctx: &Context<'_>) -> GraphQLResult<Option<Category>> {
        let Some(category_id) = self.category_id else {
            return Ok(None);
        };
        let state = ctx.data::<AppState>()?;

        let category = crate::db::category_repo::find_by_id(&state.pool, category_id)
            .await
            .map_err(|e| AppError::Database(e).extend())?;

        Ok(category.map(Category::from))
    }
}

impl From<models::Post> for Post {
    fn from(post: models::Post) -> Self {
        Post {
            id: ID(post.id.to_string()),
            post_title: post.post_title,
            post_desc: post.post_desc,
            post_author: post.post_author,
            likes: post.likes,
            created_at: post.created_at,
            category_id: post.category_id,
        }
    }
}

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    #[graphql(name = "_id")]
    pub id: ID,
    pub comment_text: String,
    pub comment_author: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::Comment> for Comment {
    fn from(comment: models::Comment) -> Self {
        Comment {
            id: ID(comment.id.to_string()),
            comment_text: comment.comment_text,
            comment_author: comment.comment_author,
            created_at: comment.created_at,
        }
    }
}

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    #[graphql(name = "_id")]
    pub id: ID,
    pub name: String,
}

impl From<models::Category> for Category {
    fn from(category: models::Category) -> Self {
        Category {
            id: ID(category.id.to_string()),
            name: category.name,
        }
    }
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// All posts, optionally filtered by author, newest first.
    async fn posts(&self, ctx: &Context<'_>, username: Option<String>) -> GraphQLResult<Vec<Post>> {
        let state = ctx.data::<AppState>()?;

        let posts = PostService::new(state.pool.clone())
            .list_posts(username.as_deref())
            .await
            .map_err(|e| e.extend())?;

        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn post(&self, ctx: &Context<'_>, post_id: ID) -> GraphQLResult<Option<Post>> {
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;

        let post = PostService::new(state.pool.clone())
            .get_post(post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.map(Post::from))
    }

    async fn categories(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Category>> {
        let state = ctx.data::<AppState>()?;

        let categories = crate::db::category_repo::list_categories(&state.pool)
            .await
            .map_err(|e| AppError::Database(e).extend())?;

        Ok(categories.into_iter().map(Category::from).collect())
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn add_post(
        &self,
        ctx: &Context<'_>,
        post_title: String,
        post_desc: String,
        category_id: Option<ID>,
    ) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let category_id = category_id.as_ref().map(parse_id).transpose()?;

        let post = PostService::new(state.pool.clone())
            .create_post(identity, &post_title, &post_desc, category_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn remove_post(&self, ctx: &Context<'_>, post_id: ID) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;

        let post = PostService::new(state.pool.clone())
            .remove_post(identity, post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn update_post(&self, ctx: &Context<'_>, post_id: ID) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;

        let post = PostService::new(state.pool.clone())
            .update_post(identity, post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn edit_post(
        &self,
        ctx: &Context<'_>,
        post_id: ID,
        post_desc: String,
    ) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;

        let post = PostService::new(state.pool.clone())
            .edit_post(identity, post_id, &post_desc)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn like_post(&self, ctx: &Context<'_>, post_id: ID) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;

        let post = PostService::new(state.pool.clone())
            .like_post(identity, post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        post_id: ID,
        comment_text: String,
    ) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;

        let post = CommentService::new(state.pool.clone())
            .add_comment(identity, post_id, &comment_text)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        post_id: ID,
        comment_id: ID,
        comment_text: String,
    ) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;
        let comment_id = parse_id(&comment_id)?;

        let post = CommentService::new(state.pool.clone())
            .update_comment(identity, post_id, comment_id, &comment_text)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn remove_comment(
        &self,
        ctx: &Context<'_>,
        post_id: ID,
        comment_id: ID,
    ) -> GraphQLResult<Post> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let post_id = parse_id(&post_id)?;
        let comment_id = parse_id(&comment_id)?;

        let post = CommentService::new(state.pool.clone())
            .remove_comment(identity, post_id, comment_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }
}
