//! Products service.

use async_trait::async_trait;
use mockall::automock;
use mongodb::bson::Document;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        indexes::IndexSpec,
        models::Product,
        records::ProductRecord,
        repository::MongoProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct MongoProductsService {
    db: Db,
    repository: MongoProductsRepository,
}

impl MongoProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: MongoProductsRepository::new(),
        }
    }

    fn into_products(records: Vec<ProductRecord>) -> Result<Vec<Product>, ProductsServiceError> {
        records.into_iter().map(Product::try_from).collect()
    }
}

#[async_trait]
impl ProductsService for MongoProductsService {
    async fn collection_exists(&self) -> Result<bool, ProductsServiceError> {
        Ok(self.repository.collection_exists(&self.db).await?)
    }

    async fn create_collection(&self) -> Result<(), ProductsServiceError> {
        Ok(self.repository.create_collection(&self.db).await?)
    }

    async fn count_products(&self) -> Result<u64, ProductsServiceError> {
        Ok(self.repository.count_documents(&self.db).await?)
    }

    async fn insert_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<usize, ProductsServiceError> {
        if products.is_empty() {
            return Ok(0);
        }

        let records = products
            .iter()
            .map(ProductRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.repository.insert_records(&self.db, &records).await?)
    }

    async fn list_indexes(&self) -> Result<Vec<IndexSpec>, ProductsServiceError> {
        let models = match self.repository.list_index_models(&self.db).await {
            Ok(models) => models,
            Err(error) => match ProductsServiceError::from(error) {
                ProductsServiceError::CollectionNotFound => return Ok(Vec::new()),
                error => return Err(error),
            },
        };

        Ok(models.iter().filter_map(IndexSpec::from_model).collect())
    }

    async fn create_index(&self, index: IndexSpec) -> Result<(), ProductsServiceError> {
        let name = self
            .repository
            .create_index(&self.db, index.to_model())
            .await?;

        debug!(index = %index, name = %name, "index created");

        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let records = self
            .repository
            .find_records(&self.db, Document::new())
            .await?;

        Self::into_products(records)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, ProductsServiceError> {
        Ok(self.repository.find_documents(&self.db).await?)
    }

    async fn search_products(&self, text: String) -> Result<Vec<Product>, ProductsServiceError> {
        let records = self
            .repository
            .find_records(&self.db, MongoProductsRepository::text_filter(&text))
            .await?;

        Self::into_products(records)
    }

    async fn products_up_to_price(
        &self,
        max_price: Decimal,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let filter = MongoProductsRepository::max_price_filter(max_price)?;
        let records = self.repository.find_records(&self.db, filter).await?;

        Self::into_products(records)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Whether the products collection exists.
    async fn collection_exists(&self) -> Result<bool, ProductsServiceError>;

    /// Creates the products collection.
    ///
    /// Fails with [`ProductsServiceError::CollectionExists`] if it is already present.
    async fn create_collection(&self) -> Result<(), ProductsServiceError>;

    /// Number of documents in the collection.
    async fn count_products(&self) -> Result<u64, ProductsServiceError>;

    /// Inserts the given products, returning how many were written.
    async fn insert_products(&self, products: Vec<NewProduct>)
    -> Result<usize, ProductsServiceError>;

    /// Indexes present on the collection that are text or ascending indexes.
    async fn list_indexes(&self) -> Result<Vec<IndexSpec>, ProductsServiceError>;

    /// Creates an index.
    async fn create_index(&self, index: IndexSpec) -> Result<(), ProductsServiceError>;

    /// Retrieves all products ordered by price.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves every stored document without decoding it.
    async fn list_documents(&self) -> Result<Vec<Document>, ProductsServiceError>;

    /// Keyword search over product name and description.
    async fn search_products(&self, text: String) -> Result<Vec<Product>, ProductsServiceError>;

    /// Products priced at or below `max_price`, cheapest first.
    async fn products_up_to_price(
        &self,
        max_price: Decimal,
    ) -> Result<Vec<Product>, ProductsServiceError>;
}
