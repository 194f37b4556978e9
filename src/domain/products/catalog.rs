//! Seed catalog.

use rust_decimal::Decimal;

use crate::domain::products::data::NewProduct;

/// Placeholder image shared by every seed product.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x200";

/// `PayPal` hosted button shared by every seed product.
pub const PAYPAL_BUTTON_ID: &str = "962SY9YFS2WD4";

const SEED_PRODUCTS: [(&str, i64, &str); 4] = [
    (
        "Premium Headphones",
        9999,
        "High-quality wireless headphones with noise cancellation",
    ),
    (
        "Smart Watch",
        19999,
        "Feature-rich smartwatch with health monitoring",
    ),
    (
        "Laptop Bag",
        4999,
        "Durable and stylish laptop bag for professionals",
    ),
    (
        "Wireless Mouse",
        2999,
        "Ergonomic wireless mouse with long battery life",
    ),
];

/// The fixed set of products a fresh database is seeded with.
///
/// Prices are exact two-place decimals.
#[must_use]
pub fn seed_products() -> Vec<NewProduct> {
    SEED_PRODUCTS
        .iter()
        .map(|&(name, cents, description)| NewProduct {
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            description: description.to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            paypal_button_id: PAYPAL_BUTTON_ID.to_string(),
        })
        .collect()
}
