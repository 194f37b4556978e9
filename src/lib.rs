//! Idempotent bootstrap of the `TechMarket` Pro product catalog in `MongoDB`.

pub mod config;
pub mod database;
pub mod domain;
pub mod initializer;
pub mod observability;

#[cfg(test)]
mod test;
