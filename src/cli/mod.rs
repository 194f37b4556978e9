use std::error::Error;

use clap::{Parser, Subcommand};
use techmarket_seed::{
    config::{DatabaseConfig, LoggingConfig},
    database::{self, Db},
};

mod search;
mod seed;
mod table;
mod verify;

#[derive(Debug, Parser)]
#[command(
    name = "techmarket-seed",
    about = "Initialise the TechMarket Pro product catalog",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the collection, seed it if empty and build its indexes.
    Seed,

    /// Check seed documents, field types and indexes.
    Verify,

    /// Query products through the text and price indexes.
    Search(search::SearchArgs),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let db = connect(&self.database).await?;

        match self.command {
            Commands::Seed => seed::run(db).await,
            Commands::Verify => verify::run(db).await,
            Commands::Search(args) => search::run(db, args).await,
        }
    }
}

async fn connect(config: &DatabaseConfig) -> Result<Db, String> {
    database::connect(config)
        .await
        .map_err(|error| format!("failed to connect to database: {}", error_chain(&error)))
}

/// Render an error followed by each of its sources.
pub(crate) fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
