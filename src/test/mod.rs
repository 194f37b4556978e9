
pub(crate) use db::{TestDb, unreachable_error, unreachable_products};
pub(crate) use memory::InMemoryProductsService;
