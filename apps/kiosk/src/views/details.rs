//! Product details view, mounted for `/product-{id}`.

use std::fmt::Write;
use std::sync::Arc;

use cafe_core::{ChangeKind, ViewKind};
use cafe_shell::{StateStore, ViewContext, ViewElement, ViewModule};

use super::{cart_badge, TextElement};

const WATCHES: &[ChangeKind] = &[ChangeKind::MenuChanged, ChangeKind::CartChanged];

#[derive(Debug, Default)]
pub struct DetailsModule;

impl ViewModule for DetailsModule {
    fn kind(&self) -> ViewKind {
        ViewKind::Details
    }

    fn create(&self, ctx: ViewContext) -> Box<dyn ViewElement> {
        let product_id = ctx.param.unwrap_or_default();
        Box::new(TextElement::new(
            ViewKind::Details,
            ctx.store,
            WATCHES,
            Arc::new(move |store: &StateStore| render(store, &product_id)),
        ))
    }
}

fn render(store: &StateStore, product_id: &str) -> String {
    let Some(menu) = store.menu() else {
        return "Loading menu...".to_string();
    };
    let Some(product) = menu.find_product(product_id) else {
        return format!("Product {:?} is not on the menu.\nBack to the menu: /", product_id);
    };

    let in_cart = store
        .cart()
        .iter()
        .find(|line| line.product_id == product.id)
        .map_or(0, |line| line.quantity);

    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", product.name, product.price());
    if let Some(description) = &product.description {
        let _ = writeln!(out, "  {}", description);
    }
    if let Some(image) = &product.image {
        let _ = writeln!(out, "  [image: {}]", image);
    }
    let _ = writeln!(out, "  In your order: {}", in_cart);
    let _ = writeln!(out, "  Type `add` to add one, `add {} <qty>` for more.", product.id);
    out.push_str(&cart_badge(store));
    out
}
