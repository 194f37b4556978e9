//! Index declarations for the products collection.

use std::{collections::BTreeSet, fmt};

use mongodb::{
    IndexModel,
    bson::{Bson, Document},
};

/// Key `MongoDB` stores in place of the indexed fields of a text index.
const TEXT_INDEX_KEY: &str = "_fts";

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Keyword search over one or more string fields.
    Text,

    /// Ascending order over one or more fields, compound in declaration order.
    Ascending,
}

/// An index over the products collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub kind: IndexKind,
    pub fields: Vec<String>,
}

impl IndexSpec {
    #[must_use]
    pub fn text<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: IndexKind::Text,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            kind: IndexKind::Ascending,
            fields: vec![field.into()],
        }
    }

    /// Whether `other` serves the same queries as `self`.
    ///
    /// Text index fields compare as a set; ascending index fields compare in order.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }

        match self.kind {
            IndexKind::Text => {
                self.fields.iter().collect::<BTreeSet<_>>()
                    == other.fields.iter().collect::<BTreeSet<_>>()
            }
            IndexKind::Ascending => self.fields == other.fields,
        }
    }

    /// Key document for `createIndexes`.
    #[must_use]
    pub fn keys(&self) -> Document {
        let mut keys = Document::new();

        for field in &self.fields {
            match self.kind {
                IndexKind::Text => keys.insert(field.clone(), "text"),
                IndexKind::Ascending => keys.insert(field.clone(), 1_i32),
            };
        }

        keys
    }

    /// Build the driver index model; the server assigns the default index name.
    #[must_use]
    pub fn to_model(&self) -> IndexModel {
        IndexModel::builder().keys(self.keys()).build()
    }

    /// Interpret an index reported by the server.
    ///
    /// Returns `None` for index shapes that are neither text nor ascending,
    /// such as descending, hashed or geospatial keys.
    #[must_use]
    pub fn from_model(model: &IndexModel) -> Option<Self> {
        if model.keys.contains_key(TEXT_INDEX_KEY) {
            let weights = model.options.as_ref().and_then(|o| o.weights.as_ref())?;

            return Some(Self::text(weights.keys().cloned()));
        }

        if model
            .keys
            .values()
            .any(|value| matches!(value, Bson::String(kind) if kind == "text"))
        {
            let fields = model
                .keys
                .iter()
                .filter(|(_, value)| matches!(value, Bson::String(kind) if kind == "text"))
                .map(|(field, _)| field.clone());

            return Some(Self::text(fields));
        }

        if model.keys.is_empty() || !model.keys.values().all(is_ascending) {
            return None;
        }

        Some(Self {
            kind: IndexKind::Ascending,
            fields: model.keys.keys().cloned().collect(),
        })
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            IndexKind::Text => "text",
            IndexKind::Ascending => "ascending",
        };

        write!(f, "{kind}({})", self.fields.join(", "))
    }
}

fn is_ascending(value: &Bson) -> bool {
    match value {
        Bson::Int32(direction) => *direction == 1,
        Bson::Int64(direction) => *direction == 1,
        Bson::Double(direction) => (direction - 1.0).abs() < f64::EPSILON,
        _ => false,
    }
}

/// Indexes the products collection is initialised with: keyword search over
/// name and description, and range queries on price.
#[must_use]
pub fn catalog_indexes() -> Vec<IndexSpec> {
    vec![
        IndexSpec::text(["name", "description"]),
        IndexSpec::ascending("price"),
    ]
}
