//! Product catalog initialization.
//!
//! Runs as a linear sequence: ensure the collection, seed it if empty, then
//! ensure its indexes. Every step checks current state first, so a rerun
//! against an initialised database changes nothing.

use tracing::{debug, info};

use crate::domain::products::{
    ProductsService, ProductsServiceError,
    catalog::seed_products,
    data::NewProduct,
    indexes::{IndexSpec, catalog_indexes},
};

pub mod errors;
pub mod verify;

pub use errors::InitializerError;

/// Line printed once initialization completes.
pub const COMPLETION_MESSAGE: &str = "Database initialized successfully!";

/// Outcome of [`Initializer::ensure_indexes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOutcome {
    pub created: Vec<IndexSpec>,
    pub existing: Vec<IndexSpec>,
}

/// Outcome of a full initialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub collection: String,
    pub collection_created: bool,
    pub inserted: usize,
    pub indexes: IndexOutcome,
}

/// Brings a products collection to its initialised state.
#[derive(Clone, Copy)]
pub struct Initializer<'a> {
    products: &'a dyn ProductsService,
    collection: &'a str,
}

impl std::fmt::Debug for Initializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Initializer")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl<'a> Initializer<'a> {
    #[must_use]
    pub fn new(products: &'a dyn ProductsService, collection: &'a str) -> Self {
        Self {
            products,
            collection,
        }
    }

    /// Run every step with the seed catalog and the catalog indexes.
    ///
    /// # Errors
    ///
    /// Returns the first step failure; earlier steps are not undone.
    pub async fn run(&self) -> Result<InitReport, InitializerError> {
        self.run_with(&seed_products(), &catalog_indexes()).await
    }

    /// Run every step with the given records and indexes.
    ///
    /// # Errors
    ///
    /// Returns the first step failure; earlier steps are not undone.
    pub async fn run_with(
        &self,
        records: &[NewProduct],
        indexes: &[IndexSpec],
    ) -> Result<InitReport, InitializerError> {
        let collection_created = self.ensure_collection().await?;
        let inserted = self.seed_if_empty(records).await?;
        let indexes = self.ensure_indexes(indexes).await?;

        info!(
            collection = %self.collection,
            collection_created,
            inserted,
            indexes_created = indexes.created.len(),
            "initialization complete"
        );

        Ok(InitReport {
            collection: self.collection.to_string(),
            collection_created,
            inserted,
            indexes,
        })
    }

    /// Create the collection unless it exists. Returns whether it was created.
    ///
    /// # Errors
    ///
    /// Returns an error when the existence check or the create call fails.
    pub async fn ensure_collection(&self) -> Result<bool, InitializerError> {
        let exists = self
            .products
            .collection_exists()
            .await
            .map_err(|source| self.collection_error(source))?;

        if exists {
            debug!(collection = %self.collection, "collection already exists");
            return Ok(false);
        }

        match self.products.create_collection().await {
            Ok(()) => {
                info!(collection = %self.collection, "collection created");
                Ok(true)
            }
            Err(ProductsServiceError::CollectionExists) => {
                debug!(collection = %self.collection, "collection created concurrently");
                Ok(false)
            }
            Err(source) => Err(self.collection_error(source)),
        }
    }

    /// Insert `records` only when the collection holds no documents.
    /// Returns how many documents were inserted.
    ///
    /// # Errors
    ///
    /// Returns an error when a record is invalid, or when counting or
    /// inserting fails. Records are validated before anything is written.
    pub async fn seed_if_empty(&self, records: &[NewProduct]) -> Result<usize, InitializerError> {
        records
            .iter()
            .try_for_each(NewProduct::validate)
            .map_err(|source| self.seed_error(source))?;

        let count = self
            .products
            .count_products()
            .await
            .map_err(|source| self.seed_error(source))?;

        if count > 0 {
            debug!(collection = %self.collection, count, "collection not empty, skipping seed");
            return Ok(0);
        }

        let inserted = self
            .products
            .insert_products(records.to_vec())
            .await
            .map_err(|source| self.seed_error(source))?;

        info!(collection = %self.collection, inserted, "seeded collection");

        Ok(inserted)
    }

    /// Create each index in `indexes` that has no equivalent on the collection.
    ///
    /// # Errors
    ///
    /// Returns an error when listing or creating indexes fails.
    pub async fn ensure_indexes(
        &self,
        indexes: &[IndexSpec],
    ) -> Result<IndexOutcome, InitializerError> {
        let mut present =
            self.products
                .list_indexes()
                .await
                .map_err(|source| InitializerError::ListIndexes {
                    collection: self.collection.to_string(),
                    source,
                })?;

        let mut outcome = IndexOutcome::default();

        for index in indexes {
            if present.iter().any(|existing| index.is_equivalent(existing)) {
                debug!(collection = %self.collection, index = %index, "index already exists");
                outcome.existing.push(index.clone());
                continue;
            }

            self.products
                .create_index(index.clone())
                .await
                .map_err(|source| InitializerError::EnsureIndex {
                    collection: self.collection.to_string(),
                    index: index.clone(),
                    source,
                })?;

            info!(collection = %self.collection, index = %index, "index created");
            present.push(index.clone());
            outcome.created.push(index.clone());
        }

        Ok(outcome)
    }

    fn collection_error(&self, source: ProductsServiceError) -> InitializerError {
        InitializerError::EnsureCollection {
            collection: self.collection.to_string(),
            source,
        }
    }

    fn seed_error(&self, source: ProductsServiceError) -> InitializerError {
        InitializerError::Seed {
            collection: self.collection.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{MockProductsService, ProductsService},
        test::{InMemoryProductsService, TestDb, unreachable_products},
    };

    use super::*;

    const COLLECTION: &str = "products";

    #[tokio::test]
    async fn test_ensure_collection_creates_missing_collection() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_collection_exists()
            .once()
            .return_once(|| Ok(false));
        products
            .expect_create_collection()
            .once()
            .return_once(|| Ok(()));

        let created = Initializer::new(&products, COLLECTION)
            .ensure_collection()
            .await?;

        assert!(created, "collection should be reported as created");

        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_collection_is_silent_when_present() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_collection_exists()
            .once()
            .return_once(|| Ok(true));
        products.expect_create_collection().never();

        let created = Initializer::new(&products, COLLECTION)
            .ensure_collection()
            .await?;

        assert!(!created, "existing collection should not be recreated");

        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_collection_tolerates_concurrent_create() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_collection_exists()
            .once()
            .return_once(|| Ok(false));
        products
            .expect_create_collection()
            .once()
            .return_once(|| Err(ProductsServiceError::CollectionExists));

        let created = Initializer::new(&products, COLLECTION)
            .ensure_collection()
            .await?;

        assert!(!created, "a collection created elsewhere is not ours");

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_if_empty_skips_populated_collection() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_count_products()
            .once()
            .return_once(|| Ok(4));
        products.expect_insert_products().never();

        let inserted = Initializer::new(&products, COLLECTION)
            .seed_if_empty(&seed_products())
            .await?;

        assert_eq!(inserted, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_if_empty_inserts_into_empty_collection() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_count_products()
            .once()
            .return_once(|| Ok(0));
        products
            .expect_insert_products()
            .once()
            .with(eq(seed_products()))
            .return_once(|records| Ok(records.len()));

        let inserted = Initializer::new(&products, COLLECTION)
            .seed_if_empty(&seed_products())
            .await?;

        assert_eq!(inserted, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_if_empty_validates_before_touching_storage() {
        let mut products = MockProductsService::new();

        products.expect_count_products().never();
        products.expect_insert_products().never();

        let mut records = seed_products();
        records.push(NewProduct {
            name: "Broken".to_string(),
            price: Decimal::new(-100, 2),
            description: String::new(),
            image_url: String::new(),
            paypal_button_id: String::new(),
        });

        let result = Initializer::new(&products, COLLECTION)
            .seed_if_empty(&records)
            .await;

        assert!(matches!(
            result,
            Err(InitializerError::Seed {
                source: ProductsServiceError::InvalidProduct(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_ensure_indexes_only_creates_missing() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_indexes().once().return_once(|| {
            Ok(vec![
                IndexSpec::ascending("_id"),
                IndexSpec::text(["description", "name"]),
            ])
        });
        products
            .expect_create_index()
            .once()
            .with(eq(IndexSpec::ascending("price")))
            .return_once(|_| Ok(()));

        let outcome = Initializer::new(&products, COLLECTION)
            .ensure_indexes(&catalog_indexes())
            .await?;

        assert_eq!(outcome.created, vec![IndexSpec::ascending("price")]);
        assert_eq!(
            outcome.existing,
            vec![IndexSpec::text(["name", "description"])]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_indexes_reports_failing_index() {
        let mut products = MockProductsService::new();

        products
            .expect_list_indexes()
            .once()
            .return_once(|| Ok(vec![]));
        products
            .expect_create_index()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidProduct("rejected")));

        let result = Initializer::new(&products, COLLECTION)
            .ensure_indexes(&catalog_indexes())
            .await;

        assert!(
            matches!(
                &result,
                Err(InitializerError::EnsureIndex { index, .. })
                    if *index == IndexSpec::text(["name", "description"])
            ),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_run_aborts_on_connection_failure() {
        let products = unreachable_products().await;

        let result = Initializer::new(&products, COLLECTION).run().await;

        assert!(
            matches!(
                &result,
                Err(InitializerError::EnsureCollection {
                    source: ProductsServiceError::Unreachable(_),
                    ..
                })
            ),
            "unexpected result: {result:?}"
        );
        assert!(
            result.as_ref().is_err_and(InitializerError::is_connection_failure),
            "failure should be reported as a connection failure"
        );
    }

    #[tokio::test]
    async fn test_run_stops_after_failing_step() {
        let mut products = MockProductsService::new();

        products
            .expect_collection_exists()
            .once()
            .return_once(|| Ok(true));
        products
            .expect_count_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidProduct("rejected")));
        products.expect_insert_products().never();
        products.expect_list_indexes().never();
        products.expect_create_index().never();

        let result = Initializer::new(&products, COLLECTION).run().await;

        assert!(
            matches!(&result, Err(InitializerError::Seed { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_fresh_database_scenario() -> TestResult {
        let products = InMemoryProductsService::new();

        let report = Initializer::new(&products, COLLECTION).run().await?;

        assert!(report.collection_created, "collection should be created");
        assert_eq!(report.inserted, 4);
        assert_eq!(report.indexes.created, catalog_indexes());

        let stored = products.list_products().await?;
        let watch = stored.iter().find(|product| product.name == "Smart Watch");

        assert_eq!(stored.len(), 4, "expected four products");
        assert_eq!(watch.map(|p| p.price), Some(Decimal::new(19999, 2)));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_run_changes_nothing() -> TestResult {
        let products = InMemoryProductsService::new();
        let initializer = Initializer::new(&products, COLLECTION);

        initializer.run().await?;
        let second = initializer.run().await?;

        assert!(!second.collection_created, "collection already existed");
        assert_eq!(second.inserted, 0);
        assert!(second.indexes.created.is_empty(), "indexes already existed");
        assert_eq!(products.count_products().await?, 4);
        assert_eq!(products.insert_calls(), 1);
        assert_eq!(products.create_index_calls(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_populated_database_gets_no_inserts() -> TestResult {
        let products = InMemoryProductsService::new();

        products.insert_products(seed_products()).await?;

        let report = Initializer::new(&products, COLLECTION).run().await?;

        assert_eq!(report.inserted, 0);
        assert_eq!(products.count_products().await?, 4);
        assert_eq!(products.insert_calls(), 1);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn test_fresh_mongodb_scenario() -> TestResult {
        let test_db = TestDb::new().await;
        let products = test_db.products();
        let initializer = Initializer::new(&products, test_db.db.collection_name());

        let first = initializer.run().await?;
        let second = initializer.run().await?;

        assert!(first.collection_created, "collection should be created");
        assert_eq!(first.inserted, 4);
        assert_eq!(second.inserted, 0);
        assert!(second.indexes.created.is_empty(), "indexes already existed");

        let report = verify::verify(&products, &seed_products(), &catalog_indexes()).await?;

        assert!(report.is_ok(), "unexpected problems: {:?}", report.problems);
        assert_eq!(report.document_count, 4);

        test_db.cleanup().await;

        Ok(())
    }
}
