//! # State Store
//!
//! Owns the shared application state (`menu`, `cart`) and broadcasts a
//! change notification after every write.
//!
//! ## Write Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         StateStore::write                               │
//! │                                                                         │
//! │  write(Cart(lines))                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Commit ──────────► fields.cart = lines       (lock held)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Snapshot handlers for "cart-changed"         (lock held, released)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Call each handler in registration order      (no lock held)         │
//! │       ├── Ok          → delivered += 1                                  │
//! │       ├── Err         → failed += 1, warn!, keep going                  │
//! │       ├── panic       → failed += 1, error!, keep going                 │
//! │       └── unsubscribed meanwhile → skipped += 1                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Return DeliveryReport                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every write notifies, even when the new value equals the old one. Views
//! rely on that to refresh.
//!
//! Handlers receive the store itself, so they re-read state without keeping
//! a strong reference to it. They may read, write, subscribe and unsubscribe
//! from inside a handler. A handler added during a broadcast first runs on the
//! next write; a handler removed during a broadcast is not called again, even
//! if it was registered when that broadcast started.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use cafe_core::{ApplicationState, CartLine, ChangeKind, MenuData};
use tracing::{debug, error, warn};

use crate::error::HandlerError;
use crate::lock;

/// What a subscriber returns.
pub type HandlerResult = Result<(), HandlerError>;

type Handler = Arc<dyn Fn(ChangeKind, &StateStore) -> HandlerResult + Send + Sync>;

/// Identifies a registered handler for [`StateStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A full replacement of one state field.
#[derive(Debug, Clone)]
pub enum StateUpdate {
    Menu(MenuData),
    Cart(Vec<CartLine>),
}

impl StateUpdate {
    /// The notification this update emits.
    pub fn kind(&self) -> ChangeKind {
        match self {
            StateUpdate::Menu(_) => ChangeKind::MenuChanged,
            StateUpdate::Cart(_) => ChangeKind::CartChanged,
        }
    }
}

/// Result of one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub kind: ChangeKind,
    /// Handlers that returned `Ok`.
    pub delivered: usize,
    /// Handlers that returned an error or panicked.
    pub failed: usize,
    /// Handlers unsubscribed by an earlier handler of the same broadcast.
    pub skipped: usize,
}

struct Fields {
    menu: Option<Arc<MenuData>>,
    cart: Arc<Vec<CartLine>>,
}

/// The single mutable state container.
pub struct StateStore {
    fields: Mutex<Fields>,
    handlers: Mutex<HashMap<ChangeKind, Vec<(SubscriptionId, Handler)>>>,
    next_id: AtomicU64,
}

impl StateStore {
    /// Creates a store with no menu and an empty cart.
    pub fn new() -> Self {
        Self::with_state(ApplicationState::default())
    }

    /// Creates a store seeded with state. No notification is sent.
    pub fn with_state(state: ApplicationState) -> Self {
        StateStore {
            fields: Mutex::new(Fields {
                menu: state.menu.map(Arc::new),
                cart: Arc::new(state.cart),
            }),
            handlers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current menu, `None` until loaded.
    pub fn menu(&self) -> Option<Arc<MenuData>> {
        lock(&self.fields).menu.clone()
    }

    /// Current cart. The returned sequence is exactly the last one written.
    pub fn cart(&self) -> Arc<Vec<CartLine>> {
        lock(&self.fields).cart.clone()
    }

    /// Copy of both fields.
    pub fn snapshot(&self) -> ApplicationState {
        let fields = lock(&self.fields);
        ApplicationState {
            menu: fields.menu.as_deref().cloned(),
            cart: fields.cart.as_ref().clone(),
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Replaces a field and notifies its subscribers before returning.
    pub fn write(&self, update: StateUpdate) -> DeliveryReport {
        let kind = update.kind();
        {
            let mut fields = lock(&self.fields);
            match update {
                StateUpdate::Menu(menu) => fields.menu = Some(Arc::new(menu)),
                StateUpdate::Cart(cart) => fields.cart = Arc::new(cart),
            }
        }
        self.notify(kind)
    }

    /// Replaces the menu.
    pub fn set_menu(&self, menu: MenuData) -> DeliveryReport {
        self.write(StateUpdate::Menu(menu))
    }

    /// Replaces the whole cart sequence.
    pub fn set_cart(&self, cart: Vec<CartLine>) -> DeliveryReport {
        self.write(StateUpdate::Cart(cart))
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a handler for one notification kind.
    pub fn subscribe<F>(&self, kind: ChangeKind, handler: F) -> SubscriptionId
    where
        F: Fn(ChangeKind, &StateStore) -> HandlerResult + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.handlers)
            .entry(kind)
            .or_default()
            .push((id, Arc::new(handler)));
        debug!(%kind, id = id.0, "Subscribed");
        id
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = lock(&self.handlers);
        for list in handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(pos);
                debug!(id = id.0, "Unsubscribed");
                return true;
            }
        }
        false
    }

    /// Number of handlers registered for a kind.
    pub fn subscriber_count(&self, kind: ChangeKind) -> usize {
        lock(&self.handlers).get(&kind).map_or(0, Vec::len)
    }

    fn is_subscribed(&self, kind: ChangeKind, id: SubscriptionId) -> bool {
        lock(&self.handlers)
            .get(&kind)
            .is_some_and(|list| list.iter().any(|(sid, _)| *sid == id))
    }

    fn notify(&self, kind: ChangeKind) -> DeliveryReport {
        let handlers: Vec<(SubscriptionId, Handler)> = lock(&self.handlers)
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        let mut report = DeliveryReport {
            kind,
            delivered: 0,
            failed: 0,
            skipped: 0,
        };

        for (id, handler) in handlers {
            if !self.is_subscribed(kind, id) {
                report.skipped += 1;
                continue;
            }
            match panic::catch_unwind(AssertUnwindSafe(|| handler(kind, self))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(err)) => {
                    report.failed += 1;
                    warn!(%kind, error = %err, "State handler failed");
                }
                Err(_) => {
                    report.failed += 1;
                    error!(%kind, "State handler panicked");
                }
            }
        }

        debug!(
            %kind,
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            "State change broadcast"
        );
        report
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = lock(&self.fields);
        f.debug_struct("StateStore")
            .field("menu_loaded", &fields.menu.is_some())
            .field("cart_lines", &fields.cart.len())
            .finish_non_exhaustive()
    }
}
