//! # Routes
//!
//! Maps a path to the view that should be mounted for it.
//!
//! ## Route Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Path               Match          View           Param                 │
//! │  ────               ─────          ────           ─────                 │
//! │  /                  exact          menu-page      -                     │
//! │  /order             exact          order-page     -                     │
//! │  /product-42        prefix         details-page   "42"                  │
//! │  /product-abc       prefix         details-page   "abc"                 │
//! │  /product-a-7       prefix         details-page   "7" (after last '-')  │
//! │  anything else      -              (none)         -                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is pure: the same path always gives the same answer.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{HOME_ROUTE, ORDER_ROUTE, PRODUCT_ROUTE_PREFIX};

// =============================================================================
// View Kind
// =============================================================================

/// The views the shell knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ViewKind {
    /// Home view listing the menu.
    Menu,
    /// Cart contents and checkout.
    Order,
    /// A single product.
    Details,
}

impl ViewKind {
    /// Every view kind.
    pub const ALL: [ViewKind; 3] = [ViewKind::Menu, ViewKind::Order, ViewKind::Details];

    /// The view mounted for the home route. Pre-loaded at startup.
    pub const HOME: ViewKind = ViewKind::Menu;

    /// Element name of the view.
    pub const fn name(&self) -> &'static str {
        match self {
            ViewKind::Menu => "menu-page",
            ViewKind::Order => "order-page",
            ViewKind::Details => "details-page",
        }
    }

    /// Static chrome for this view.
    pub const fn chrome(&self) -> ViewChrome {
        match self {
            ViewKind::Menu => ViewChrome {
                title: "Coffee Masters",
                theme_color: "#43281C",
            },
            ViewKind::Order => ViewChrome {
                title: "Your Order",
                theme_color: "#F5EBDC",
            },
            ViewKind::Details => ViewChrome {
                title: "Product Details",
                theme_color: "#8A5A44",
            },
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page title and theme-color hint applied when a view is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewChrome {
    pub title: &'static str,
    pub theme_color: &'static str,
}

// =============================================================================
// Route
// =============================================================================

/// An opaque navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Route(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves this route. See [`resolve`].
    pub fn resolve(&self) -> Option<ResolvedRoute> {
        resolve(&self.0)
    }

    /// Route of a product details page.
    pub fn product(id: &str) -> Self {
        Route(format!("{}{}", PRODUCT_ROUTE_PREFIX, id))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(path: &str) -> Self {
        Route::new(path)
    }
}

impl From<String> for Route {
    fn from(path: String) -> Self {
        Route(path)
    }
}

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedRoute {
    pub view: ViewKind,
    /// Trailing identifier for parametric routes.
    pub param: Option<String>,
}

/// Resolves a path to a view and optional parameter.
///
/// Returns `None` for paths no view handles. Callers treat that as a no-op,
/// never as an error.
pub fn resolve(path: &str) -> Option<ResolvedRoute> {
    match path {
        HOME_ROUTE => Some(ResolvedRoute {
            view: ViewKind::Menu,
            param: None,
        }),
        ORDER_ROUTE => Some(ResolvedRoute {
            view: ViewKind::Order,
            param: None,
        }),
        _ if path.starts_with(PRODUCT_ROUTE_PREFIX) => {
            // The prefix itself ends in '-', so rfind always hits.
            let param = path.rfind('-').map(|i| path[i + 1..].to_string());
            Some(ResolvedRoute {
                view: ViewKind::Details,
                param,
            })
        }
        _ => None,
    }
}
