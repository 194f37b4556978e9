//! Product Records

use std::str::FromStr;

use mongodb::bson::{Bson, Decimal128, Document, oid::ObjectId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::products::{
    data::NewProduct, errors::ProductsServiceError, models::Product,
};

/// Stored document fields and the BSON type each must carry.
pub const REQUIRED_FIELDS: [(&str, FieldType); 5] = [
    ("name", FieldType::String),
    ("price", FieldType::Decimal),
    ("description", FieldType::String),
    ("imageUrl", FieldType::String),
    ("paypalButtonId", FieldType::String),
];

/// BSON type expected for a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Decimal,
}

/// Product document as stored in the products collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: Decimal128,
    pub description: String,
    pub image_url: String,
    pub paypal_button_id: String,
}

impl TryFrom<&NewProduct> for ProductRecord {
    type Error = ProductsServiceError;

    fn try_from(product: &NewProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            id: None,
            name: product.name.clone(),
            price: to_decimal128(product.price)?,
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            paypal_button_id: product.paypal_button_id.clone(),
        })
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductsServiceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: record.name,
            price: from_decimal128(&record.price)?,
            description: record.description,
            image_url: record.image_url,
            paypal_button_id: record.paypal_button_id,
        })
    }
}

/// Convert an exact decimal to its BSON `Decimal128` form.
///
/// # Errors
///
/// Returns [`ProductsServiceError::InvalidPrice`] when the value has no
/// `Decimal128` representation.
pub fn to_decimal128(price: Decimal) -> Result<Decimal128, ProductsServiceError> {
    let value = price.to_string();

    Decimal128::from_str(&value).map_err(|error| {
        ProductsServiceError::InvalidPrice(format!("{value}: {error}"))
    })
}

/// Convert a BSON `Decimal128` back to an exact decimal.
///
/// # Errors
///
/// Returns [`ProductsServiceError::InvalidPrice`] for non-finite values or values
/// outside the range of [`Decimal`].
pub fn from_decimal128(price: &Decimal128) -> Result<Decimal, ProductsServiceError> {
    let value = price.to_string();

    Decimal::from_str(&value)
        .or_else(|_| Decimal::from_scientific(&value))
        .map_err(|error| ProductsServiceError::InvalidPrice(format!("{value}: {error}")))
}

/// Fields of a stored document that are absent or carry the wrong type.
#[must_use]
pub fn invalid_fields(document: &Document) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .filter(|(field, expected)| !has_type(document.get(field), *expected))
        .map(|(field, _)| *field)
        .collect()
}

fn has_type(value: Option<&Bson>, expected: FieldType) -> bool {
    match (value, expected) {
        (Some(Bson::String(_)), FieldType::String) => true,
        (Some(Bson::Decimal128(price)), FieldType::Decimal) => from_decimal128(price).is_ok(),
        _ => false,
    }
}
