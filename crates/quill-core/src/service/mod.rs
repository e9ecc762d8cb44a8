//! Resolution services - one per record kind.
//!
//! Each service maps a GraphQL root operation or relationship field onto a
//! single repository call. Relationship lookups are issued per parent record
//! and never batched, so a list of N parents resolved with its relationship
//! costs N extra store calls.

mod authors;
mod posts;

#[cfg(test)]
mod stub;

pub use authors::AuthorService;
pub use posts::PostService;
