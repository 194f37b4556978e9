//! Product Models

use rust_decimal::Decimal;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Storage identifier, rendered as hex.
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub paypal_button_id: String,
}
