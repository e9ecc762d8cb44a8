//! GraphQL schema: authors, posts and their relationship fields.
//!
//! Relationship fields (`Author.posts`, `Post.author`) are resolved lazily
//! and once per parent object; nothing here batches lookups.

mod author;
mod error;
mod post;


use async_graphql::{EmptySubscription, ID, MergedObject, Schema};
use uuid::Uuid;

use author::{AuthorMutation, AuthorQuery};
use post::{PostMutation, PostQuery};

use crate::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AuthorQuery, PostQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthorMutation, PostMutation);

pub type QuillSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with both resolution services as context data.
pub fn build_schema(state: &AppState) -> QuillSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(state.authors.clone())
    .data(state.posts.clone())
    .finish()
}

/// A GraphQL `ID` that is not a UUID cannot name any stored record.
fn parse_id(id: &ID) -> Option<Uuid> {
    Uuid::parse_str(id.as_str()).ok()
}
