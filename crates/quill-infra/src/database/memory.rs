//! In-memory store - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BaseRepository, PostRepository};

#[derive(Default)]
struct Tables {
    authors: Vec<Author>,
    posts: Vec<Post>,
}

/// Both tables behind one async RwLock, kept in insertion order.
///
/// Mirrors the PostgreSQL schema's constraints: unique author email,
/// unique post slug, and a post's author cannot be deleted while the
/// post exists. Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.authors
            .iter()
            .any(|a| a.email == email && Some(a.id) != except)
    }

    fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.posts
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != except)
    }
}

#[async_trait]
impl BaseRepository<Author, Uuid> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        Ok(self.tables.read().await.authors.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .authors
            .iter()
            .position(|a| a.id == id)
            .ok_or(RepoError::NotFound)?;

        if tables.posts.iter().any(|p| p.author_id == id) {
            return Err(RepoError::Constraint(
                "author is still referenced by posts".to_string(),
            ));
        }

        tables.authors.remove(index);
        Ok(())
    }
}

#[async_trait]
impl AuthorRepository for InMemoryStore {
    async fn create(&self, input: NewAuthor) -> Result<Author, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, None) {
            return Err(RepoError::Constraint("author email already exists".to_string()));
        }

        let author = Author {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            created_at: Utc::now(),
        };
        tables.authors.push(author.clone());
        Ok(author)
    }

    async fn update(&self, id: Uuid, changes: AuthorChanges) -> Result<Author, RepoError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .authors
            .iter()
            .position(|a| a.id == id)
            .ok_or(RepoError::NotFound)?;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(RepoError::Constraint("author email already exists".to_string()));
            }
        }

        let author = &mut tables.authors[index];
        changes.apply(author);
        Ok(author.clone())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        tables.posts.remove(index);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.iter().any(|a| a.id == input.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                input.author_id
            )));
        }
        if tables.slug_taken(&input.slug, None) {
            return Err(RepoError::Constraint("post slug already exists".to_string()));
        }

        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            slug: input.slug,
            content: input.content,
            published: input.published,
            created_at: Utc::now(),
            author_id: input.author_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        if let Some(slug) = &changes.slug {
            if tables.slug_taken(slug, Some(id)) {
                return Err(RepoError::Constraint("post slug already exists".to_string()));
            }
        }

        let post = &mut tables.posts[index];
        changes.apply(post);
        Ok(post.clone())
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn ada() -> NewAuthor {
        NewAuthor {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn post_by(author_id: Uuid, slug: &str) -> NewPost {
        NewPost {
            title: "T".to_string(),
            slug: slug.to_string(),
            content: "C".to_string(),
            published: false,
            author_id,
        }
    }

    #[tokio::test]
    async fn created_records_get_fresh_ids() {
        let store = InMemoryStore::new();
        let first = AuthorRepository::create(&store, ada()).await.unwrap();
        let second = AuthorRepository::create(
            &store,
            NewAuthor {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            },
        )
        .await
        .unwrap();

        assert_ne!(first.id, second.id);
        assert!(!first.id.is_nil());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        AuthorRepository::create(&store, ada()).await.unwrap();

        let err = AuthorRepository::create(&store, ada()).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn post_requires_existing_author() {
        let store = InMemoryStore::new();

        let err = PostRepository::create(&store, post_by(Uuid::new_v4(), "t"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn author_with_posts_cannot_be_deleted() {
        let store = Arc::new(InMemoryStore::new());
        let authors: Arc<dyn AuthorRepository> = store.clone();
        let posts: Arc<dyn PostRepository> = store.clone();

        let author = authors.create(ada()).await.unwrap();
        let post = posts.create(post_by(author.id, "t")).await.unwrap();

        assert!(matches!(
            authors.delete(author.id).await,
            Err(RepoError::Constraint(_))
        ));
        assert!(authors.find_by_id(author.id).await.unwrap().is_some());

        posts.delete(post.id).await.unwrap();
        authors.delete(author.id).await.unwrap();
        assert!(authors.find_by_id(author.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_unknown_post_is_not_found() {
        let store = InMemoryStore::new();

        let err = PostRepository::update(&store, Uuid::new_v4(), PostChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn update_of_unknown_author_with_taken_email_is_not_found() {
        let store = InMemoryStore::new();
        AuthorRepository::create(&store, ada()).await.unwrap();

        let changes = AuthorChanges {
            name: None,
            email: Some("ada@example.com".to_string()),
        };
        let err = AuthorRepository::update(&store, Uuid::new_v4(), changes)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn update_of_unknown_post_with_taken_slug_is_not_found() {
        let store = InMemoryStore::new();
        let author = AuthorRepository::create(&store, ada()).await.unwrap();
        PostRepository::create(&store, post_by(author.id, "taken"))
            .await
            .unwrap();

        let changes = PostChanges {
            slug: Some("taken".to_string()),
            ..PostChanges::default()
        };
        let err = PostRepository::update(&store, Uuid::new_v4(), changes)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn posts_are_filtered_by_author() {
        let store = Arc::new(InMemoryStore::new());
        let authors: Arc<dyn AuthorRepository> = store.clone();
        let posts: Arc<dyn PostRepository> = store.clone();

        let ada = authors.create(ada()).await.unwrap();
        let grace = authors
            .create(NewAuthor {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            })
            .await
            .unwrap();
        posts.create(post_by(ada.id, "a")).await.unwrap();
        posts.create(post_by(ada.id, "b")).await.unwrap();

        assert_eq!(posts.find_by_author_id(ada.id).await.unwrap().len(), 2);
        assert!(posts.find_by_author_id(grace.id).await.unwrap().is_empty());
    }
}
