//! GraphQL schema: root objects, context helpers and wire types
//!
//! Resolvers are thin: identity first, then state, then a service call.
//! Field names follow the client's existing wire contract (`_id`, camelCase
//! field names), so existing client query documents keep working.

pub mod auth;
pub mod post;
pub mod user;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, MergedObject, Result as GraphQLResult, Schema, ID};
use uuid::Uuid;

use crate::error::AppError;
use crate::security::Identity;
use crate::AppState;

/// Root query object
#[derive(MergedObject, Default)]
pub struct QueryRoot(user::UserQuery, post::PostQuery);

/// Root mutation object
#[derive(MergedObject, Default)]
pub struct MutationRoot(auth::AuthMutation, user::UserMutation, post::PostMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema over the shared application state.
pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

/// The caller's identity, if a valid token accompanied the request.
pub fn current_identity<'a>(ctx: &Context<'a>) -> Option<&'a Identity> {
    ctx.data_opt::<Identity>()
}

/// The caller's identity, or the authentication error every guarded
/// operation fails with. Checked before any state access, so anonymous
/// calls never reach the store.
pub fn require_identity<'a>(ctx: &Context<'a>) -> GraphQLResult<&'a Identity> {
    ctx.data_opt::<Identity>()
        .ok_or_else(|| AppError::Unauthenticated.extend())
}

/// Parse a client-supplied ID argument into a Uuid.
pub fn parse_id(id: &ID) -> GraphQLResult<Uuid> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| AppError::Validation(format!("Invalid id: {}", id.as_str())).extend())
}
