use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Generic repository trait shared by every record kind.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Return every record, in store-defined order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find a record by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete a record by its ID. Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    /// Insert a new author; the store assigns `id` and `created_at`.
    async fn create(&self, author: NewAuthor) -> Result<Author, RepoError>;

    /// Write the supplied fields only. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, changes: AuthorChanges) -> Result<Author, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Insert a new post. Fails with `Constraint` when `author_id` is unknown.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Write the supplied fields only. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;

    /// All posts owned by `author_id`.
    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
