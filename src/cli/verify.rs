use techmarket_seed::{
    database::Db,
    domain::products::{MongoProductsService, catalog::seed_products, indexes::catalog_indexes},
    initializer::verify::verify,
};
use tracing::warn;

use super::error_chain;

pub(crate) async fn run(db: Db) -> Result<(), String> {
    let products = MongoProductsService::new(db.clone());

    let report = verify(&products, &seed_products(), &catalog_indexes())
        .await
        .map_err(|error| {
            format!(
                "failed to read `{}`: {}",
                db.collection_name(),
                error_chain(&error)
            )
        })?;

    if report.is_ok() {
        println!(
            "collection `{}` verified: {} documents, all indexes present",
            db.collection_name(),
            report.document_count
        );
        return Ok(());
    }

    for problem in &report.problems {
        warn!(collection = %db.collection_name(), "{problem}");
    }

    Err(format!(
        "collection `{}` failed verification with {} problem(s):\n  {}",
        db.collection_name(),
        report.problems.len(),
        report
            .problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  ")
    ))
}
