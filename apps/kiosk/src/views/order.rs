//! Order view: the priced cart and its total.

use std::fmt::Write;
use std::sync::Arc;

use cafe_core::{cart, ChangeKind, ViewKind};
use cafe_shell::{StateStore, ViewContext, ViewElement, ViewModule};

use super::TextElement;

const WATCHES: &[ChangeKind] = &[ChangeKind::CartChanged, ChangeKind::MenuChanged];

#[derive(Debug, Default)]
pub struct OrderModule;

impl ViewModule for OrderModule {
    fn kind(&self) -> ViewKind {
        ViewKind::Order
    }

    fn create(&self, ctx: ViewContext) -> Box<dyn ViewElement> {
        Box::new(TextElement::new(
            ViewKind::Order,
            ctx.store,
            WATCHES,
            Arc::new(render),
        ))
    }
}

fn render(store: &StateStore) -> String {
    let summary = cart::summarize(&store.cart(), store.menu().as_deref());
    if summary.is_empty() {
        return "Your order is empty.\nBrowse the menu: /".to_string();
    }

    let mut out = String::new();
    for line in &summary.lines {
        let _ = writeln!(
            out,
            "  {:>2} x {:<24} {:>8}   remove {}",
            line.quantity,
            line.name,
            line.line_total.to_string(),
            line.product_id
        );
    }
    for id in &summary.unresolved {
        let _ = writeln!(out, "  ?? product {} is no longer on the menu", id);
    }
    let _ = write!(
        out,
        "  {:>2}   {:<24} {:>8}",
        summary.total_quantity,
        "TOTAL",
        summary.total.to_string()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures;
    use cafe_core::CartLine;

    #[test]
    fn test_empty_order() {
        let store = StateStore::new();
        assert!(render(&store).starts_with("Your order is empty."));
    }

    #[test]
    fn test_priced_lines_and_total() {
        let store = StateStore::new();
        store.set_menu(fixtures::menu());
        store.set_cart(vec![CartLine::new("2", 2), CartLine::new("22", 1), CartLine::new("404", 1)]);

        let text = render(&store);

        assert!(text.contains("Cappuccino"));
        assert!(text.contains("$8.40"));
        assert!(text.contains("product 404 is no longer on the menu"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("$11.35"));
    }

    #[test]
    fn test_oversized_cart_renders() {
        let store = StateStore::new();
        store.set_menu(fixtures::menu());
        store.set_cart(vec![CartLine::new("1", u32::MAX), CartLine::new("2", 1)]);

        let text = render(&store);

        assert!(text.contains("Black Americano"));
        assert!(text.contains("TOTAL"));
    }
}
