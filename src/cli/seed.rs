use std::io::Write;

use techmarket_seed::{
    database::Db,
    domain::products::{MongoProductsService, ProductsService},
    initializer::{COMPLETION_MESSAGE, Initializer},
};
use tracing::info;

use super::error_chain;

pub(crate) async fn run(db: Db) -> Result<(), String> {
    let products = MongoProductsService::new(db.clone());

    seed(&products, db.collection_name(), &mut std::io::stdout()).await
}

async fn seed(
    products: &dyn ProductsService,
    collection: &str,
    out: &mut impl Write,
) -> Result<(), String> {
    let report = Initializer::new(products, collection)
        .run()
        .await
        .map_err(|error| {
            if error.is_connection_failure() {
                format!("database connection lost: {}", error_chain(&error))
            } else {
                error_chain(&error)
            }
        })?;

    info!(
        collection = %report.collection,
        created = report.collection_created,
        inserted = report.inserted,
        indexes_created = report.indexes.created.len(),
        indexes_existing = report.indexes.existing.len(),
        "seed finished"
    );

    writeln!(out, "{COMPLETION_MESSAGE}")
        .map_err(|error| format!("failed to write output: {error}"))
}
