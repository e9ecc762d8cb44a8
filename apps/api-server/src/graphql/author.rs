use async_graphql::{Context, ID, InputObject, Object, Result};
use chrono::{DateTime, Utc};

use quill_core::domain::{Author, AuthorChanges, NewAuthor};
use quill_core::{AuthorService, DomainError};

use super::error::DomainResultExt;
use super::parse_id;
use super::post::PostObject;

/// GraphQL view of an [`Author`].
pub struct AuthorObject(pub Author);

#[Object(name = "Author")]
impl AuthorObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    /// Posts written by this author. Costs one lookup per author in the response.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = ctx.data::<AuthorService>()?.posts_of(&self.0).await.gql()?;
        Ok(posts.into_iter().map(PostObject).collect())
    }
}

#[derive(InputObject)]
pub struct CreateAuthorInput {
    pub name: String,
    pub email: String,
}

/// Omitted fields keep their stored values.
#[derive(InputObject)]
pub struct UpdateAuthorInput {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Default)]
pub struct AuthorQuery;

#[Object]
impl AuthorQuery {
    /// All authors.
    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<AuthorObject>> {
        let authors = ctx.data::<AuthorService>()?.list().await.gql()?;
        Ok(authors.into_iter().map(AuthorObject).collect())
    }

    /// The author with this id, or `null`.
    async fn author(&self, ctx: &Context<'_>, id: ID) -> Result<Option<AuthorObject>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let author = ctx.data::<AuthorService>()?.get(id).await.gql()?;
        Ok(author.map(AuthorObject))
    }
}

#[derive(Default)]
pub struct AuthorMutation;

#[Object]
impl AuthorMutation {
    async fn create_author(
        &self,
        ctx: &Context<'_>,
        input: CreateAuthorInput,
    ) -> Result<AuthorObject> {
        let author = ctx
            .data::<AuthorService>()?
            .create(NewAuthor {
                name: input.name,
                email: input.email,
            })
            .await
            .gql()?;
        Ok(AuthorObject(author))
    }

    async fn update_author(
        &self,
        ctx: &Context<'_>,
        input: UpdateAuthorInput,
    ) -> Result<AuthorObject> {
        let id = parse_id(&input.id)
            .ok_or_else(|| DomainError::not_found("Author", input.id.as_str()))
            .gql()?;
        let changes = AuthorChanges {
            name: input.name,
            email: input.email,
        };
        let author = ctx.data::<AuthorService>()?.update(id, changes).await.gql()?;
        Ok(AuthorObject(author))
    }

    /// `true` if the author was deleted. Never fails.
    async fn delete_author(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let Some(id) = parse_id(&id) else {
            return Ok(false);
        };
        Ok(ctx.data::<AuthorService>()?.delete(id).await)
    }
}
