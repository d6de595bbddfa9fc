//! # Validation Module
//!
//! Checks applied to menu data before it is written into the store.
//!
//! ## Rules
//! - Category and product names must not be empty
//! - Product ids must not be empty and must be unique across the menu
//! - Prices must not be negative
//!
//! ## Usage
//! ```rust
//! use cafe_core::validation::validate_menu;
//! use cafe_core::MenuData;
//!
//! let menu = MenuData::from_json(r#"[{"name": "Tea", "products": []}]"#).unwrap();
//! validate_menu(&menu).unwrap();
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::MenuData;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a whole menu. Stops at the first problem.
pub fn validate_menu(menu: &MenuData) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for category in &menu.categories {
        if category.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "category name".to_string(),
            });
        }

        for product in &category.products {
            validate_product_id(&product.id)?;

            if product.name.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: format!("name of product {}", product.id),
                });
            }

            if product.price_cents < 0 {
                return Err(ValidationError::MustNotBeNegative {
                    field: format!("price of product {}", product.id),
                });
            }

            if !seen.insert(product.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validates a product id.
///
/// Ids end up as the suffix of `/product-{id}` and the route parameter is
/// taken after the last `-`, so an id containing `-` could never be reached.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }
    if id.contains('-') {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: format!("'{}' contains '-'", id),
        });
    }
    Ok(())
}

/// Validates a quantity typed by a user.
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Product};

    fn product(id: &str, name: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price_cents,
            image: None,
        }
    }

    fn menu_of(products: Vec<Product>) -> MenuData {
        MenuData::new(vec![Category {
            name: "Coffee".to_string(),
            products,
        }])
    }

    #[test]
    fn test_valid_menu() {
        let menu = menu_of(vec![product("1", "Latte", 400), product("2", "Mocha", 450)]);
        assert!(validate_menu(&menu).is_ok());
        assert!(validate_menu(&MenuData::default()).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let menu = menu_of(vec![product("1", "Latte", 400), product("1", "Mocha", 450)]);
        assert!(matches!(
            validate_menu(&menu),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_bad_products_rejected() {
        assert!(validate_menu(&menu_of(vec![product("", "Latte", 400)])).is_err());
        assert!(validate_menu(&menu_of(vec![product("1", " ", 400)])).is_err());
        assert!(validate_menu(&menu_of(vec![product("1", "Latte", -1)])).is_err());
        assert!(matches!(
            validate_menu(&menu_of(vec![product("a-1", "Latte", 400)])),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_empty_category_name_rejected() {
        let menu = MenuData::new(vec![Category {
            name: String::new(),
            products: vec![],
        }]);
        assert!(matches!(
            validate_menu(&menu),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }
}
