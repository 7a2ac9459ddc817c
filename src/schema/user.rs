//! User schema and resolvers

use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;
use crate::schema::post::Post;
use crate::schema::{parse_id, require_identity};
use crate::services::{AuthService, PostService, UserService};
use crate::AppState;

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
#[graphql(complex)]
pub struct User {
    #[graphql(name = "_id")]
    pub id: ID,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[ComplexObject]
impl User {
    /// Posts owned by this user, newest first.
    async fn posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Post>> {
        let state = ctx.data::<AppState>()?;

        let posts = PostService::new(state.pool.clone())
            .list_posts(Some(&self.username))
            .await
            .map_err(|e| e.extend())?;

        Ok(posts.into_iter().map(Post::from).collect())
    }
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        User {
            id: ID(user.id.to_string()),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<User>> {
        let state = ctx.data::<AppState>()?;

        let users = UserService::new(state.pool.clone())
            .list()
            .await
            .map_err(|e| e.extend())?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn user(&self, ctx: &Context<'_>, username: String) -> GraphQLResult<Option<User>> {
        let state = ctx.data::<AppState>()?;

        let user = UserService::new(state.pool.clone())
            .get_by_username(&username)
            .await
            .map_err(|e| e.extend())?;

        Ok(user.map(User::from))
    }

    /// The caller's own user document; fails for anonymous callers.
    async fn me(&self, ctx: &Context<'_>) -> GraphQLResult<User> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;

        let user = UserService::new(state.pool.clone())
            .me(identity)
            .await
            .map_err(|e| e.extend())?;

        Ok(user.into())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        username: String,
        email: String,
    ) -> GraphQLResult<User> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let user_id = parse_id(&user_id)?;

        let user = UserService::new(state.pool.clone())
            .update_profile(identity, user_id, &username, &email)
            .await
            .map_err(|e| e.extend())?;

        Ok(user.into())
    }

    async fn update_password(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        email: String,
        password: String,
    ) -> GraphQLResult<User> {
        let identity = require_identity(ctx)?;
        let state = ctx.data::<AppState>()?;
        let user_id = parse_id(&user_id)?;

        let user = AuthService::new(state.pool.clone(), state.jwt.clone())
            .change_password(identity, user_id, &email, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(user.into())
    }
}
