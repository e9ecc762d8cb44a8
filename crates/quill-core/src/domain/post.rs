use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - an article owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    /// Join key to the owning author. Fixed at creation.
    pub author_id: Uuid,
}

/// Fields required to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub author_id: Uuid,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)?;
        validate_slug(&self.slug)
    }
}

/// Partial update of a post. There is deliberately no `author_id` here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.content.is_none()
            && self.published.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into `post`.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.trim().is_empty() {
        return Err(DomainError::Validation("slug must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_requires_title_and_slug() {
        let post = NewPost {
            title: String::new(),
            slug: "t".to_string(),
            content: "C".to_string(),
            published: false,
            author_id: Uuid::new_v4(),
        };
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));

        let post = NewPost {
            title: "T".to_string(),
            slug: " ".to_string(),
            ..post
        };
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn apply_keeps_omitted_fields() {
        let mut post = Post {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            slug: "t".to_string(),
            content: "C".to_string(),
            published: false,
            created_at: Utc::now(),
            author_id: Uuid::new_v4(),
        };
        let before = post.clone();

        PostChanges {
            title: Some("T2".to_string()),
            ..Default::default()
        }
        .apply(&mut post);

        assert_eq!(post.title, "T2");
        assert_eq!(post.slug, before.slug);
        assert_eq!(post.content, before.content);
        assert_eq!(post.published, before.published);
        assert_eq!(post.author_id, before.author_id);
    }
}
