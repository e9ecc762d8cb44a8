use async_graphql::{Context, ID, InputObject, Object, Result};
use chrono::{DateTime, Utc};

use quill_core::domain::{NewPost, Post, PostChanges};
use quill_core::{DomainError, PostService};

use super::author::AuthorObject;
use super::error::DomainResultExt;
use super::parse_id;

/// GraphQL view of a [`Post`]. `author_id` stays internal.
pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn published(&self) -> bool {
        self.0.published
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    /// The post's author. Costs one lookup per post in the response.
    async fn author(&self, ctx: &Context<'_>) -> Result<AuthorObject> {
        let author = ctx.data::<PostService>()?.author_of(&self.0).await.gql()?;
        Ok(AuthorObject(author))
    }
}

#[derive(InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub slug: String,
    pub content: String,
    /// Defaults to `false`.
    pub published: Option<bool>,
    pub author_id: ID,
}

/// Omitted fields keep their stored values. The author cannot be changed.
#[derive(InputObject)]
pub struct UpdatePostInput {
    pub id: ID,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// All posts.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = ctx.data::<PostService>()?.list().await.gql()?;
        Ok(posts.into_iter().map(PostObject).collect())
    }

    /// The post with this id, or `null`.
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<PostObject>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let post = ctx.data::<PostService>()?.get(id).await.gql()?;
        Ok(post.map(PostObject))
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, input: CreatePostInput) -> Result<PostObject> {
        let author_id = parse_id(&input.author_id)
            .ok_or_else(|| DomainError::Validation("authorId is not a valid id".to_string()))
            .gql()?;
        let post = ctx
            .data::<PostService>()?
            .create(NewPost {
                title: input.title,
                slug: input.slug,
                content: input.content,
                published: input.published.unwrap_or(false),
                author_id,
            })
            .await
            .gql()?;
        Ok(PostObject(post))
    }

    async fn update_post(&self, ctx: &Context<'_>, input: UpdatePostInput) -> Result<PostObject> {
        let id = parse_id(&input.id)
            .ok_or_else(|| DomainError::not_found("Post", input.id.as_str()))
            .gql()?;
        let changes = PostChanges {
            title: input.title,
            slug: input.slug,
            content: input.content,
            published: input.published,
        };
        let post = ctx.data::<PostService>()?.update(id, changes).await.gql()?;
        Ok(PostObject(post))
    }

    /// `true` if the post was deleted. Never fails.
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let Some(id) = parse_id(&id) else {
            return Ok(false);
        };
        Ok(ctx.data::<PostService>()?.delete(id).await)
    }
}
