//! Products

pub mod catalog;
pub mod data;
pub mod errors;
pub mod indexes;
pub mod models;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
