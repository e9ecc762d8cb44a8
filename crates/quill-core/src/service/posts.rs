use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Author, NewPost, Post, PostChanges};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, PostRepository};

const ENTITY: &str = "Post";

/// Post CRUD plus the `Post.author` relationship.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self { posts, authors }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.find_by_id(id).await?)
    }

    /// The author reference is checked by the store, not here.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        input.validate()?;
        let post = self.posts.create(input).await?;
        tracing::debug!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        changes.validate()?;
        self.posts
            .update(id, changes)
            .await
            .map_err(|e| e.for_record(ENTITY, id))
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        match self.posts.delete(id).await {
            Ok(()) => {
                tracing::debug!(post_id = %id, "Post deleted");
                true
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "Post delete failed");
                false
            }
        }
    }

    /// The author owning `post`. One store call per invocation.
    pub async fn author_of(&self, post: &Post) -> Result<Author, DomainError> {
        self.authors
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Author", post.author_id))
    }
}
