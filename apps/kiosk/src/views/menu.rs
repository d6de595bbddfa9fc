//! Menu view: every category with its products and their links.

use std::fmt::Write;
use std::sync::Arc;

use cafe_core::{ChangeKind, Route, ViewKind};
use cafe_shell::{StateStore, ViewContext, ViewElement, ViewModule};

use super::{cart_badge, TextElement};

const WATCHES: &[ChangeKind] = &[ChangeKind::MenuChanged, ChangeKind::CartChanged];

#[derive(Debug, Default)]
pub struct MenuModule;

impl ViewModule for MenuModule {
    fn kind(&self) -> ViewKind {
        ViewKind::Menu
    }

    fn create(&self, ctx: ViewContext) -> Box<dyn ViewElement> {
        Box::new(TextElement::new(
            ViewKind::Menu,
            ctx.store,
            WATCHES,
            Arc::new(render),
        ))
    }
}

fn render(store: &StateStore) -> String {
    let Some(menu) = store.menu() else {
        return format!("Loading menu...\n{}", cart_badge(store));
    };

    let mut out = String::new();
    for category in &menu.categories {
        let _ = writeln!(out, "{}", category.name);
        for product in &category.products {
            let _ = writeln!(
                out,
                "  {:<24} {:>7}   {}",
                product.name,
                product.price().to_string(),
                Route::product(&product.id)
            );
        }
    }
    out.push_str(&cart_badge(store));
    out
}
