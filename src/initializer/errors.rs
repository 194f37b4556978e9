//! Initializer errors.

use thiserror::Error;

use crate::domain::products::{ProductsServiceError, indexes::IndexSpec};

#[derive(Debug, Error)]
pub enum InitializerError {
    #[error("failed to ensure collection `{collection}`")]
    EnsureCollection {
        collection: String,
        #[source]
        source: ProductsServiceError,
    },

    #[error("failed to seed collection `{collection}`")]
    Seed {
        collection: String,
        #[source]
        source: ProductsServiceError,
    },

    #[error("failed to ensure index {index} on `{collection}`")]
    EnsureIndex {
        collection: String,
        index: IndexSpec,
        #[source]
        source: ProductsServiceError,
    },

    #[error("failed to list indexes on `{collection}`")]
    ListIndexes {
        collection: String,
        #[source]
        source: ProductsServiceError,
    },
}

impl InitializerError {
    /// The storage error behind this failure.
    #[must_use]
    pub fn storage_error(&self) -> &ProductsServiceError {
        match self {
            Self::EnsureCollection { source, .. }
            | Self::Seed { source, .. }
            | Self::EnsureIndex { source, .. }
            | Self::ListIndexes { source, .. } => source,
        }
    }

    /// Whether the database was unreachable or refused the session.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        self.storage_error().is_connection_failure()
    }
}
