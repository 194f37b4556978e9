//! Products service errors.

use mongodb::error::{CommandError, Error, ErrorKind, WriteError, WriteFailure};
use thiserror::Error;

/// Server error code for a collection that does not exist.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// Server error code for a collection that already exists.
const NAMESPACE_EXISTS: i32 = 48;

/// Server error codes for rejected credentials or missing privileges.
const UNAUTHORIZED: [i32; 2] = [13, 18];

/// Server error codes for an index that clashes with an existing one.
const INDEX_CONFLICT: [i32; 2] = [85, 86];

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("collection already exists")]
    CollectionExists,

    #[error("collection not found")]
    CollectionNotFound,

    #[error("database unreachable")]
    Unreachable(#[source] Error),

    #[error("authentication or authorization rejected")]
    Unauthorized(#[source] Error),

    #[error("index conflicts with an existing index")]
    IndexConflict(#[source] Error),

    #[error("write rejected")]
    WriteRejected(#[source] Error),

    #[error("storage error")]
    Storage(#[source] Error),

    #[error("invalid price value `{0}`")]
    InvalidPrice(String),

    #[error("invalid product: {0}")]
    InvalidProduct(&'static str),
}

impl ProductsServiceError {
    /// Whether the failure means the database could not be reached or the
    /// session was not allowed to act.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Unauthorized(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    CollectionExists,
    CollectionNotFound,
    Unreachable,
    Unauthorized,
    IndexConflict,
    WriteRejected,
    Storage,
}

fn classify(kind: &ErrorKind) -> Class {
    match kind {
        ErrorKind::Command(CommandError { code, .. }) => match *code {
            NAMESPACE_EXISTS => Class::CollectionExists,
            NAMESPACE_NOT_FOUND => Class::CollectionNotFound,
            code if UNAUTHORIZED.contains(&code) => Class::Unauthorized,
            code if INDEX_CONFLICT.contains(&code) => Class::IndexConflict,
            _ => Class::Storage,
        },
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code, .. }))
            if UNAUTHORIZED.contains(code) =>
        {
            Class::Unauthorized
        }
        ErrorKind::Write(_) | ErrorKind::InsertMany(_) => Class::WriteRejected,
        ErrorKind::Authentication { .. } => Class::Unauthorized,
        ErrorKind::ServerSelection { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => Class::Unreachable,
        _ => Class::Storage,
    }
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error.kind) {
            Class::CollectionExists => Self::CollectionExists,
            Class::CollectionNotFound => Self::CollectionNotFound,
            Class::Unreachable => Self::Unreachable(error),
            Class::Unauthorized => Self::Unauthorized(error),
            Class::IndexConflict => Self::IndexConflict(error),
            Class::WriteRejected => Self::WriteRejected(error),
            Class::Storage => Self::Storage(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::products::ProductsService,
        test::{unreachable_error, unreachable_products},
    };

    use super::*;

    #[tokio::test]
    async fn test_server_selection_failure_is_unreachable() {
        let error = ProductsServiceError::from(unreachable_error().await);

        assert!(
            matches!(error, ProductsServiceError::Unreachable(_)),
            "unexpected classification: {error:?}"
        );
        assert!(error.is_connection_failure());
    }

    #[tokio::test]
    async fn test_service_call_on_unreachable_server_is_connection_failure() {
        let products = unreachable_products().await;

        let result = products.count_products().await;

        assert!(
            result
                .as_ref()
                .is_err_and(ProductsServiceError::is_connection_failure),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn test_invalid_product_is_not_connection_class() {
        let error = ProductsServiceError::InvalidProduct("product name cannot be empty");

        assert!(!error.is_connection_failure());
    }
}
