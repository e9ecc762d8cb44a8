//! SeaORM entities, one per table.

pub mod author;
pub mod post;
