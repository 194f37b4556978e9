//! `TechMarket` Pro catalog seeding CLI

use std::process::ExitCode;

use clap::Parser;
use techmarket_seed::observability;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init(cli.logging()) {
        eprintln!("{}", cli::error_chain(&error));
        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
