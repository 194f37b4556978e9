//! Domain modules.

pub mod products;
