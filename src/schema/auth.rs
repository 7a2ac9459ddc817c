//! Registration and login schema

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::schema::user::User;
use crate::services::AuthService;
use crate::AppState;

/// Token plus the freshly authenticated user.
#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
#[graphql(name = "Auth")]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> GraphQLResult<AuthPayload> {
        let state = ctx.data::<AppState>()?;

        let (token, user) = AuthService::new(state.pool.clone(), state.jwt.clone())
            .register(&username, &email, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(AuthPayload {
            token,
            user: user.into(),
        })
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> GraphQLResult<AuthPayload> {
        let state = ctx.data::<AppState>()?;

        let (token, user) = AuthService::new(state.pool.clone(), state.jwt.clone())
            .login(&email, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(AuthPayload {
            token,
            user: user.into(),
        })
    }
}
