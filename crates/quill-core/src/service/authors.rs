use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Author, AuthorChanges, NewAuthor, Post};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, PostRepository};

const ENTITY: &str = "Author";

/// Author CRUD plus the `Author.posts` relationship.
#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostRepository>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { authors, posts }
    }

    pub async fn list(&self) -> Result<Vec<Author>, DomainError> {
        Ok(self.authors.find_all().await?)
    }

    /// `Ok(None)` when no author has this id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Author>, DomainError> {
        Ok(self.authors.find_by_id(id).await?)
    }

    pub async fn create(&self, input: NewAuthor) -> Result<Author, DomainError> {
        input.validate()?;
        let author = self.authors.create(input).await?;
        tracing::debug!(author_id = %author.id, "Author created");
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, changes: AuthorChanges) -> Result<Author, DomainError> {
        changes.validate()?;
        self.authors
            .update(id, changes)
            .await
            .map_err(|e| e.for_record(ENTITY, id))
    }

    /// Returns `false` instead of failing; the cause is only logged.
    pub async fn delete(&self, id: Uuid) -> bool {
        match self.authors.delete(id).await {
            Ok(()) => {
                tracing::debug!(author_id = %id, "Author deleted");
                true
            }
            Err(e) => {
                tracing::warn!(author_id = %id, error = %e, "Author delete failed");
                false
            }
        }
    }

    /// Posts owned by `author`. One store call per invocation.
    pub async fn posts_of(&self, author: &Author) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author_id(author.id).await?)
    }
}
