//! # cafe-core: Pure Domain Logic for the Cafe Shell
//!
//! This crate holds everything the shell needs that does not touch I/O:
//! route resolution, the menu and cart shapes, cart math and menu checks.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe Shell Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end (browser page / kiosk)                │   │
//! │  │      Menu view ──► Details view ──► Order view                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ navigate / set_cart                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cafe-shell                                   │   │
//! │  │    Router, StateStore, ModuleRegistry, HistoryBridge            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   route   │  │   types   │  │   cart    │  │ validation│  │   │
//! │  │   │  resolve  │  │  MenuData │  │  add/rm   │  │   menu    │  │   │
//! │  │   │  chrome   │  │  CartLine │  │  totals   │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`] - Path resolution and the per-view chrome table
//! - [`types`] - Domain types (MenuData, CartLine, NavigationEntry, ...)
//! - [`cart`] - Full-sequence cart operations
//! - [`money`] - Integer-cents price type
//! - [`error`] - Domain error types
//! - [`validation`] - Menu validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::route::{resolve, ViewKind};
//!
//! let resolved = resolve("/product-42").unwrap();
//! assert_eq!(resolved.view, ViewKind::Details);
//! assert_eq!(resolved.param.as_deref(), Some("42"));
//!
//! assert!(resolve("/unknown").is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod route;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use route::{resolve, ResolvedRoute, Route, ViewChrome, ViewKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Route of the home view. This view is pre-loaded at startup.
pub const HOME_ROUTE: &str = "/";

/// Exact route of the order view.
pub const ORDER_ROUTE: &str = "/order";

/// Prefix of the product details route (`/product-{id}`).
pub const PRODUCT_ROUTE_PREFIX: &str = "/product-";

/// Maximum distinct lines in a cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 99;
