//! Products Repository

use futures::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{Document, doc},
};
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        records::{ProductRecord, to_decimal128},
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct MongoProductsRepository;

impl MongoProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn collection_exists(&self, db: &Db) -> Result<bool, mongodb::error::Error> {
        let names = db
            .database()
            .list_collection_names()
            .filter(doc! { "name": db.collection_name() })
            .await?;

        Ok(names.iter().any(|name| name == db.collection_name()))
    }

    pub(crate) async fn create_collection(&self, db: &Db) -> Result<(), mongodb::error::Error> {
        db.database().create_collection(db.collection_name()).await
    }

    pub(crate) async fn count_documents(&self, db: &Db) -> Result<u64, mongodb::error::Error> {
        db.documents().count_documents(doc! {}).await
    }

    pub(crate) async fn insert_records(
        &self,
        db: &Db,
        records: &[ProductRecord],
    ) -> Result<usize, mongodb::error::Error> {
        let result = db
            .collection::<ProductRecord>()
            .insert_many(records)
            .await?;

        Ok(result.inserted_ids.len())
    }

    pub(crate) async fn list_index_models(
        &self,
        db: &Db,
    ) -> Result<Vec<IndexModel>, mongodb::error::Error> {
        db.documents().list_indexes().await?.try_collect().await
    }

    pub(crate) async fn create_index(
        &self,
        db: &Db,
        model: IndexModel,
    ) -> Result<String, mongodb::error::Error> {
        let result = db.documents().create_index(model).await?;

        Ok(result.index_name)
    }

    pub(crate) async fn find_documents(
        &self,
        db: &Db,
    ) -> Result<Vec<Document>, mongodb::error::Error> {
        db.documents().find(doc! {}).await?.try_collect().await
    }

    pub(crate) async fn find_records(
        &self,
        db: &Db,
        filter: Document,
    ) -> Result<Vec<ProductRecord>, mongodb::error::Error> {
        db.collection::<ProductRecord>()
            .find(filter)
            .sort(doc! { "price": 1, "name": 1 })
            .await?
            .try_collect()
            .await
    }

    pub(crate) fn text_filter(text: &str) -> Document {
        doc! { "$text": { "$search": text } }
    }

    pub(crate) fn max_price_filter(max_price: Decimal) -> Result<Document, ProductsServiceError> {
        Ok(doc! { "price": { "$lte": to_decimal128(max_price)? } })
    }
}
