//! Repository stub for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
use crate::error::RepoError;
use crate::ports::{AuthorRepository, BaseRepository, PostRepository};

/// Stands in for both repositories. With an error factory every call
/// fails with it; without one, reads come back empty and writes fail
/// with `NotFound`.
pub struct StubStore {
    error: Option<fn() -> RepoError>,
    pub calls: AtomicUsize,
}

impl StubStore {
    pub fn failing(error: fn() -> RepoError) -> Self {
        Self {
            error: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn read<T>(&self, empty: T) -> Result<T, RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.error {
            Some(make) => Err(make()),
            None => Ok(empty),
        }
    }

    fn write<T>(&self) -> Result<T, RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.map(|make| make()).unwrap_or(RepoError::NotFound))
    }
}

#[async_trait]
impl BaseRepository<Author, Uuid> for StubStore {
    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        self.read(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Author>, RepoError> {
        self.read(None)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        self.write()
    }
}

#[async_trait]
impl AuthorRepository for StubStore {
    async fn create(&self, _author: NewAuthor) -> Result<Author, RepoError> {
        self.write()
    }

    async fn update(&self, _id: Uuid, _changes: AuthorChanges) -> Result<Author, RepoError> {
        self.write()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for StubStore {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.read(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        self.read(None)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        self.write()
    }
}

#[async_trait]
impl PostRepository for StubStore {
    async fn create(&self, _post: NewPost) -> Result<Post, RepoError> {
        self.write()
    }

    async fn update(&self, _id: Uuid, _changes: PostChanges) -> Result<Post, RepoError> {
        self.write()
    }

    async fn find_by_author_id(&self, _author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.read(Vec::new())
    }
}
