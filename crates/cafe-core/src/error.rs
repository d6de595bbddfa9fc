//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cafe-core errors (this file)                                          │
//! │  ├── CoreError        - Cart and menu rule violations                  │
//! │  └── ValidationError  - Menu data failures                             │
//! │                                                                         │
//! │  cafe-shell errors (separate crate)                                    │
//! │  ├── ShellError       - Navigation, loading, config                    │
//! │  ├── LoadError        - View module loading                            │
//! │  └── HandlerError     - Subscriber failures                            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShellError → front-end            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by cart operations and menu handling.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not on the menu.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product id is not in the cart.
    #[error("Product {0} not in cart")]
    NotInCart(String),

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Menu JSON could not be parsed.
    #[error("Menu is malformed: {0}")]
    MalformedMenu(#[from] serde_json::Error),

    /// Menu data failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Data validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
