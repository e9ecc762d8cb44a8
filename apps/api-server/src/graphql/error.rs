//! Mapping of domain errors onto GraphQL errors.

use async_graphql::{Error, ErrorExtensions};
use quill_core::DomainError;

/// Every error carries `extensions.code`; internal details are logged, not returned.
pub(crate) fn graphql_error(err: DomainError) -> Error {
    let code = match &err {
        DomainError::NotFound { .. } => "NOT_FOUND",
        DomainError::Validation(_) => "VALIDATION_ERROR",
        DomainError::Constraint(_) => "CONSTRAINT_VIOLATION",
        DomainError::Internal(_) => "INTERNAL_SERVER_ERROR",
    };

    let message = match err {
        DomainError::Internal(detail) => {
            tracing::error!("Internal error: {}", detail);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    Error::new(message).extend_with(|_, e| e.set("code", code))
}

pub(crate) trait DomainResultExt<T> {
    /// Convert a service result into a GraphQL result.
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> DomainResultExt<T> for Result<T, DomainError> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(graphql_error)
    }
}
