//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use quill_core::domain::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BaseRepository, PostRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::errors::repo_error;
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, input: NewAuthor) -> Result<Author, RepoError> {
        let model = author::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(repo_error)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: AuthorChanges) -> Result<Author, RepoError> {
        // An UPDATE without SET columns is not valid SQL; read instead.
        if changes.is_empty() {
            return BaseRepository::<Author, Uuid>::find_by_id(self, id)
                .await?
                .ok_or(RepoError::NotFound);
        }

        let model = author::ActiveModel {
            id: Unchanged(id),
            name: changes.name.map_or(NotSet, Set),
            email: changes.email.map_or(NotSet, Set),
            created_at: NotSet,
        }
        .update(&self.db)
        .await
        .map_err(repo_error)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            slug: Set(input.slug),
            content: Set(input.content),
            published: Set(input.published),
            created_at: Set(Utc::now().into()),
            author_id: Set(input.author_id),
        }
        .insert(&self.db)
        .await
        .map_err(repo_error)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        if changes.is_empty() {
            return BaseRepository::<Post, Uuid>::find_by_id(self, id)
                .await?
                .ok_or(RepoError::NotFound);
        }

        let model = post::ActiveModel {
            id: Unchanged(id),
            title: changes.title.map_or(NotSet, Set),
            slug: changes.slug.map_or(NotSet, Set),
            content: changes.content.map_or(NotSet, Set),
            published: changes.published.map_or(NotSet, Set),
            created_at: NotSet,
            author_id: NotSet,
        }
        .update(&self.db)
        .await
        .map_err(repo_error)?;

        Ok(model.into())
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(%author_id, "Finding posts by author");

        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
