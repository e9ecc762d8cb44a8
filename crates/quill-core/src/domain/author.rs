use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author entity - the owner of zero or more posts.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
}

impl NewAuthor {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}

/// Partial update of an author. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AuthorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into `author`.
    pub fn apply(self, author: &mut Author) {
        if let Some(name) = self.name {
            author.name = name;
        }
        if let Some(email) = self.email {
            author.email = email;
        }
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".to_string()));
    }
    if email.trim() != email {
        return Err(DomainError::Validation(
            "email must not have surrounding whitespace".to_string(),
        ));
    }
    Ok(())
}
