//! # Text Views
//!
//! The kiosk renders every view as plain text. All three views share one
//! element type, [`TextElement`], which differs only in what it renders and
//! which notifications it listens to.
//!
//! ```text
//!   mount()    render now, subscribe to each watched kind
//!   notified   re-render into the cache from the store handed to the handler
//!   render()   return the cached text
//!   unmount()  unsubscribe everything
//! ```

pub mod details;
pub mod menu;
pub mod order;

use std::sync::{Arc, Mutex, PoisonError};

use cafe_core::{cart, ChangeKind, ViewKind};
use cafe_shell::{StateStore, SubscriptionId, ViewElement};

pub use details::DetailsModule;
pub use menu::MenuModule;
pub use order::OrderModule;

type RenderFn = Arc<dyn Fn(&StateStore) -> String + Send + Sync>;

/// A text view bound to the store while mounted.
pub struct TextElement {
    kind: ViewKind,
    store: Arc<StateStore>,
    watches: &'static [ChangeKind],
    render: RenderFn,
    cache: Arc<Mutex<String>>,
    subscriptions: Vec<SubscriptionId>,
}

impl TextElement {
    pub fn new(
        kind: ViewKind,
        store: Arc<StateStore>,
        watches: &'static [ChangeKind],
        render: RenderFn,
    ) -> Self {
        TextElement {
            kind,
            store,
            watches,
            render,
            cache: Arc::new(Mutex::new(String::new())),
            subscriptions: Vec::new(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl ViewElement for TextElement {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn mount(&mut self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = (self.render)(&self.store);

        for &kind in self.watches {
            let cache = self.cache.clone();
            let render = self.render.clone();
            let id = self.store.subscribe(kind, move |_, store| {
                *cache.lock().unwrap_or_else(PoisonError::into_inner) = render(store);
                Ok(())
            });
            self.subscriptions.push(id);
        }
    }

    fn unmount(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.store.unsubscribe(id);
        }
    }

    fn render(&self) -> String {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// One-line cart badge shown under every view.
pub fn cart_badge(store: &StateStore) -> String {
    let summary = cart::summarize(&store.cart(), store.menu().as_deref());
    match summary.total_quantity {
        0 => "[cart: empty]".to_string(),
        1 => format!("[cart: 1 item, {}]", summary.total),
        n => format!("[cart: {} items, {}]", n, summary.total),
    }
}
