//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::errors::ProductsServiceError;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub paypal_button_id: String,
}

impl NewProduct {
    /// Check the constraints a product must satisfy before it is written.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidProduct`] for a blank name or a
    /// negative price.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidProduct(
                "product name cannot be empty",
            ));
        }

        if self.price < Decimal::ZERO {
            return Err(ProductsServiceError::InvalidProduct(
                "product price cannot be negative",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: Decimal) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            description: String::new(),
            image_url: String::new(),
            paypal_button_id: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_zero_price() {
        assert!(product("Freebie", Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let result = product("   ", Decimal::new(100, 2)).validate();

        assert!(matches!(
            result,
            Err(ProductsServiceError::InvalidProduct(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let result = product("Refund", Decimal::new(-1, 2)).validate();

        assert!(matches!(
            result,
            Err(ProductsServiceError::InvalidProduct(_))
        ));
    }
}
