//! Domain entities - the core business objects.

mod author;
mod post;

pub use author::{Author, AuthorChanges, NewAuthor};
pub use post::{NewPost, Post, PostChanges};
