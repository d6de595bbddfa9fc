//! # Domain Types
//!
//! Core domain types shared by the shell and its views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuData     │   │    Category     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  categories ────┼──►│  name           │   │  id             │       │
//! │  │                 │   │  products ──────┼──►│  name           │       │
//! │  └─────────────────┘   └─────────────────┘   │  price_cents    │       │
//! │                                              └────────▲────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐            │ by id          │
//! │  │ ApplicationState│   │    CartLine     │────────────┘                │
//! │  │  menu?          │   │  product_id     │                             │
//! │  │  cart[] ────────┼──►│  quantity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ NavigationEntry │   │   ChangeKind    │                             │
//! │  │  route          │   │  menu-changed   │                             │
//! │  └─────────────────┘   │  cart-changed   │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Menu
// =============================================================================

/// A product on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Product identifier. JSON numbers are accepted and kept as strings.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional description for the details view.
    #[serde(default)]
    pub description: Option<String>,

    /// Price in cents.
    pub price_cents: i64,

    /// Image file name, relative to the menu's image directory.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A named group of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// The full menu, as supplied by the data-loading collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuData {
    pub categories: Vec<Category>,
}

/// Menu documents come either wrapped (`{"categories": [...]}`) or as a bare
/// array of categories.
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    Bare(Vec<Category>),
    Wrapped(MenuData),
}

impl MenuData {
    /// Creates a menu from categories.
    pub fn new(categories: Vec<Category>) -> Self {
        MenuData { categories }
    }

    /// Parses a menu document.
    ///
    /// ## Example
    /// ```rust
    /// use cafe_core::MenuData;
    ///
    /// let menu = MenuData::from_json(
    ///     r#"[{"name": "Coffees", "products": [{"id": 1, "name": "Flat White", "priceCents": 380}]}]"#,
    /// ).unwrap();
    /// assert_eq!(menu.find_product("1").unwrap().name, "Flat White");
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let document: MenuDocument = serde_json::from_str(json)?;
        Ok(match document {
            MenuDocument::Bare(categories) => MenuData { categories },
            MenuDocument::Wrapped(menu) => menu,
        })
    }

    /// Iterates over every product in category order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.categories.iter().flat_map(|c| c.products.iter())
    }

    /// Looks up a product by id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products().find(|p| p.id == id)
    }

    /// Number of products across all categories.
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the cart.
///
/// The cart is always handled as a full ordered sequence of lines. Lines are
/// kept in insertion order and refer to products by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        CartLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Application State
// =============================================================================

/// The two shared fields owned by the state store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApplicationState {
    /// `None` until the menu has been loaded.
    pub menu: Option<MenuData>,
    pub cart: Vec<CartLine>,
}

// =============================================================================
// Change Notifications
// =============================================================================

/// Kind of state-change broadcast. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ChangeKind {
    MenuChanged,
    CartChanged,
}

impl ChangeKind {
    /// Every notification kind.
    pub const ALL: [ChangeKind; 2] = [ChangeKind::MenuChanged, ChangeKind::CartChanged];

    /// Event name as seen by front-end listeners.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::MenuChanged => "menu-changed",
            ChangeKind::CartChanged => "cart-changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// One entry on the history stack, pushed per forward navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavigationEntry {
    pub route: String,
}

impl NavigationEntry {
    pub fn new(route: impl Into<String>) -> Self {
        NavigationEntry {
            route: route.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU_JSON: &str = r#"
        [
            {
                "name": "HOT Coffee",
                "products": [
                    {"id": 1, "name": "Black Americano", "priceCents": 250, "image": "blackamericano.png"},
                    {"id": "2", "name": "Cappuccino", "priceCents": 350, "description": "Double shot"}
                ]
            },
            {"name": "Cakes", "products": [{"id": 11, "name": "Cheesecake", "priceCents": 425}]}
        ]
    "#;

    #[test]
    fn test_menu_from_bare_array() {
        let menu = MenuData::from_json(MENU_JSON).unwrap();
        assert_eq!(menu.categories.len(), 2);
        assert_eq!(menu.product_count(), 3);
        assert_eq!(menu.find_product("1").unwrap().name, "Black Americano");
        assert_eq!(menu.find_product("2").unwrap().price().cents(), 350);
        assert!(menu.find_product("99").is_none());
    }

    #[test]
    fn test_menu_from_wrapped_document() {
        let json = r#"{"categories": [{"name": "Tea", "products": []}]}"#;
        let menu = MenuData::from_json(json).unwrap();
        assert_eq!(menu.categories[0].name, "Tea");
        assert_eq!(menu.product_count(), 0);
    }

    #[test]
    fn test_menu_rejects_garbage() {
        assert!(MenuData::from_json("{\"menu\": 3}").is_err());
        assert!(MenuData::from_json("not json").is_err());
    }

    #[test]
    fn test_cart_line_uses_camel_case() {
        let line = CartLine::new("1", 2);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"productId":"1","quantity":2}"#);
    }

    #[test]
    fn test_change_kind_names() {
        assert_eq!(ChangeKind::MenuChanged.to_string(), "menu-changed");
        assert_eq!(
            serde_json::to_string(&ChangeKind::CartChanged).unwrap(),
            "\"cart-changed\""
        );
    }
}
