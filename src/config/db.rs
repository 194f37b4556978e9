//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// `MongoDB` connection string
    #[arg(
        long,
        env = "MONGODB_URI",
        default_value = "mongodb://localhost:27017",
        hide_env_values = true,
        global = true
    )]
    pub mongodb_uri: String,

    /// Target database name
    #[arg(long, env = "DATABASE_NAME", default_value = "techmarketpro", global = true)]
    pub database_name: String,

    /// Products collection name
    #[arg(long, env = "PRODUCTS_COLLECTION", default_value = "products", global = true)]
    pub collection: String,

    /// Seconds to wait for a reachable server before giving up.
    #[arg(
        long,
        env = "MONGODB_SERVER_SELECTION_TIMEOUT_SECONDS",
        default_value_t = 10_u64,
        global = true
    )]
    pub server_selection_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Server selection timeout as a [`Duration`].
    #[must_use]
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }
}
