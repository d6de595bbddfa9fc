//! # Cart Operations
//!
//! The store transports the cart as a full ordered sequence and never merges
//! lines itself. These functions build the next sequence from the current
//! one, so a view action is always `store.set_cart(cart::add(&current, ..)?)`.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View Action             Function            Next Sequence              │
//! │  ───────────             ────────            ─────────────              │
//! │                                                                         │
//! │  Add to cart ──────────► add() ────────────► merge or push line         │
//! │  Change quantity ──────► set_quantity() ───► replace qty (0 removes)    │
//! │  Remove ───────────────► remove() ─────────► drop line                  │
//! │  View order ───────────► summarize() ──────► (read only)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, MenuData};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Adds `quantity` of a product, merging into an existing line.
pub fn add(lines: &[CartLine], product_id: &str, quantity: u32) -> CoreResult<Vec<CartLine>> {
    let mut next = lines.to_vec();

    if let Some(line) = next.iter_mut().find(|l| l.product_id == product_id) {
        let requested = line.quantity.saturating_add(quantity);
        if requested > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_LINE_QUANTITY,
            });
        }
        line.quantity = requested;
        return Ok(next);
    }

    if next.len() >= MAX_CART_LINES {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_LINES,
        });
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    next.push(CartLine::new(product_id, quantity));
    Ok(next)
}

/// Sets the quantity of an existing line. Zero removes the line.
pub fn set_quantity(lines: &[CartLine], product_id: &str, quantity: u32) -> CoreResult<Vec<CartLine>> {
    if quantity == 0 {
        return remove(lines, product_id);
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    let mut next = lines.to_vec();
    match next.iter_mut().find(|l| l.product_id == product_id) {
        Some(line) => {
            line.quantity = quantity;
            Ok(next)
        }
        None => Err(CoreError::NotInCart(product_id.to_string())),
    }
}

/// Removes a line by product id.
pub fn remove(lines: &[CartLine], product_id: &str) -> CoreResult<Vec<CartLine>> {
    let next: Vec<CartLine> = lines
        .iter()
        .filter(|l| l.product_id != product_id)
        .cloned()
        .collect();

    if next.len() == lines.len() {
        Err(CoreError::NotInCart(product_id.to_string()))
    } else {
        Ok(next)
    }
}

/// A priced line, joined against the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Cart totals for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<PricedLine>,
    /// Saturates at `u32::MAX`. The store accepts any cart sequence.
    pub total_quantity: u32,
    pub total: Money,
    /// Lines whose product is not on the menu. They are not priced.
    pub unresolved: Vec<String>,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.unresolved.is_empty()
    }
}

/// Prices a cart against the menu, keeping cart order.
pub fn summarize(lines: &[CartLine], menu: Option<&MenuData>) -> CartSummary {
    let mut summary = CartSummary::default();

    for line in lines {
        summary.total_quantity = summary.total_quantity.saturating_add(line.quantity);

        match menu.and_then(|m| m.find_product(&line.product_id)) {
            Some(product) => {
                let line_total = product.price() * line.quantity;
                summary.total += line_total;
                summary.lines.push(PricedLine {
                    product_id: line.product_id.clone(),
                    name: product.name.clone(),
                    quantity: line.quantity,
                    unit_price: product.price(),
                    line_total,
                });
            }
            None => summary.unresolved.push(line.product_id.clone()),
        }
    }

    summary
}
