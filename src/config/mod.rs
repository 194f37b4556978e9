//! Command-line and environment configuration.

pub mod db;
pub mod observability;

pub use db::DatabaseConfig;
pub use observability::{LogFormat, LoggingConfig};
