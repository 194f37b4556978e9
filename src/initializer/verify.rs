//! Post-initialization checks.

use std::fmt;

use mongodb::bson::{self, Bson, Document};
use rust_decimal::Decimal;

use crate::domain::products::{
    ProductsService, ProductsServiceError,
    data::NewProduct,
    indexes::IndexSpec,
    records::{ProductRecord, from_decimal128, invalid_fields},
};

/// A way the collection differs from its initialised state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    UnexpectedCount { expected: usize, found: u64 },
    MissingIndex(IndexSpec),
    MissingProduct(String),
    DuplicateProduct { name: String, copies: usize },
    PriceMismatch { name: String, expected: Decimal, found: Decimal },
    InvalidFields { id: String, fields: Vec<&'static str> },
    Undecodable { id: String, reason: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCount { expected, found } => {
                write!(f, "expected {expected} documents, found {found}")
            }
            Self::MissingIndex(index) => write!(f, "missing index {index}"),
            Self::MissingProduct(name) => write!(f, "missing product `{name}`"),
            Self::DuplicateProduct { name, copies } => {
                write!(f, "product `{name}` stored {copies} times")
            }
            Self::PriceMismatch {
                name,
                expected,
                found,
            } => write!(f, "product `{name}` priced {found}, expected {expected}"),
            Self::InvalidFields { id, fields } => {
                write!(f, "document {id} has missing or mistyped fields: {}", fields.join(", "))
            }
            Self::Undecodable { id, reason } => {
                write!(f, "document {id} cannot be read as a product: {reason}")
            }
        }
    }
}

/// Result of [`verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub document_count: u64,
    pub problems: Vec<Problem>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Compare the collection against the seed `records` and the declared `indexes`.
///
/// # Errors
///
/// Returns an error when the collection cannot be read.
pub async fn verify(
    products: &dyn ProductsService,
    records: &[NewProduct],
    indexes: &[IndexSpec],
) -> Result<VerifyReport, ProductsServiceError> {
    let mut problems = Vec::new();

    let document_count = products.count_products().await?;

    if usize::try_from(document_count).ok() != Some(records.len()) {
        problems.push(Problem::UnexpectedCount {
            expected: records.len(),
            found: document_count,
        });
    }

    let present = products.list_indexes().await?;

    problems.extend(
        indexes
            .iter()
            .filter(|index| !present.iter().any(|existing| index.is_equivalent(existing)))
            .cloned()
            .map(Problem::MissingIndex),
    );

    let documents = products.list_documents().await?;
    let stored = stored_products(&documents, &mut problems);

    for record in records {
        let matches: Vec<&ProductRecord> = stored
            .iter()
            .filter(|stored| stored.name == record.name)
            .collect();

        match matches.as_slice() {
            [] => problems.push(Problem::MissingProduct(record.name.clone())),
            [only] => {
                if let Ok(found) = from_decimal128(&only.price)
                    && found != record.price
                {
                    problems.push(Problem::PriceMismatch {
                        name: record.name.clone(),
                        expected: record.price,
                        found,
                    });
                }
            }
            many => problems.push(Problem::DuplicateProduct {
                name: record.name.clone(),
                copies: many.len(),
            }),
        }
    }

    Ok(VerifyReport {
        document_count,
        problems,
    })
}

fn stored_products(documents: &[Document], problems: &mut Vec<Problem>) -> Vec<ProductRecord> {
    let mut stored = Vec::with_capacity(documents.len());

    for document in documents {
        let fields = invalid_fields(document);

        if !fields.is_empty() {
            problems.push(Problem::InvalidFields {
                id: document_id(document),
                fields,
            });
            continue;
        }

        match bson::from_document::<ProductRecord>(document.clone()) {
            Ok(record) => stored.push(record),
            Err(error) => problems.push(Problem::Undecodable {
                id: document_id(document),
                reason: error.to_string(),
            }),
        }
    }

    stored
}

fn document_id(document: &Document) -> String {
    match document.get("_id") {
        Some(Bson::ObjectId(id)) => id.to_hex(),
        Some(other) => other.to_string(),
        None => "<unknown>".to_string(),
    }
}
