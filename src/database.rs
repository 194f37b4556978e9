//! Database connection management

use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    options::ClientOptions,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Application name reported to the server in the connection handshake.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Errors raised while establishing a connection.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The connection string could not be parsed.
    #[error("invalid MongoDB connection string")]
    InvalidUri(#[source] mongodb::error::Error),

    /// The server did not answer the ping.
    #[error("database unreachable or credentials rejected")]
    Unreachable(#[source] mongodb::error::Error),
}

/// Handle to the target database, scoped to one products collection.
#[derive(Debug, Clone)]
pub struct Db {
    database: Database,
    collection: String,
}

impl Db {
    #[must_use]
    pub fn new(database: Database, collection: impl Into<String>) -> Self {
        Self {
            database,
            collection: collection.into(),
        }
    }

    /// The underlying database handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Name of the products collection.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Typed handle to the products collection.
    #[must_use]
    pub fn collection<T>(&self) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.database.collection::<T>(&self.collection)
    }

    /// Untyped handle to the products collection.
    #[must_use]
    pub fn documents(&self) -> Collection<Document> {
        self.collection::<Document>()
    }
}

/// Connect to `MongoDB` and verify the server answers a ping.
///
/// # Errors
///
/// Returns an error if the connection string is invalid, or when the server
/// cannot be reached or rejects the credentials.
pub async fn connect(config: &DatabaseConfig) -> Result<Db, DatabaseError> {
    let mut options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .map_err(DatabaseError::InvalidUri)?;

    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(config.server_selection_timeout());

    let client = Client::with_options(options).map_err(DatabaseError::InvalidUri)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(DatabaseError::Unreachable)?;

    debug!(database = %config.database_name, "ping succeeded");
    info!(
        database = %config.database_name,
        collection = %config.collection,
        "connected to MongoDB"
    );

    Ok(Db::new(
        client.database(&config.database_name),
        config.collection.clone(),
    ))
}
