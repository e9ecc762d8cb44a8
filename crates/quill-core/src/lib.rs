//! # Quill Core
//!
//! The domain layer of the Quill API: authors, their posts, and the
//! services that resolve them. This crate holds no infrastructure
//! dependencies; storage is reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::{AuthorService, PostService};
