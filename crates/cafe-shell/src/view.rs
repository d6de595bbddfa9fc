//! # View Contracts
//!
//! What the router needs from a view. A [`ViewModule`] is the loaded code of
//! a view (resolved once, cached by the registry). Each mount creates a new
//! [`ViewElement`] from it.
//!
//! ## Element Lifecycle
//! ```text
//!   ViewModule::create(ctx)
//!          │
//!          ▼
//!   ViewElement ──mount()──► reads StateStore, subscribes
//!          │
//!          │   ... state changes trigger its handlers ...
//!          │
//!          └──unmount()──► unsubscribes
//! ```

use std::sync::Arc;

use cafe_core::{Route, ViewKind};

use crate::store::StateStore;

/// Everything a view gets when an element is created.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub store: Arc<StateStore>,
    /// The route that was navigated to.
    pub route: Route,
    /// Trailing route parameter, for parametric routes.
    pub param: Option<String>,
}

/// The loaded implementation of a view.
pub trait ViewModule: Send + Sync {
    fn kind(&self) -> ViewKind;

    /// Creates a fresh, not yet mounted element.
    fn create(&self, ctx: ViewContext) -> Box<dyn ViewElement>;
}

/// A mountable UI fragment.
///
/// `mount` and `unmount` run while the display slot is locked. They must not
/// read the slot (`DisplaySlot::render`, `current_*`) or navigate: both
/// re-enter the slot lock and deadlock. A store write from there runs its
/// handlers under the same lock, so those handlers have the same limits.
/// Reading the store and subscribing are fine. A panic in `mount` is caught
/// and the previous view is put back.
pub trait ViewElement: Send {
    fn kind(&self) -> ViewKind;

    /// Called when the element is attached to the display slot.
    fn mount(&mut self) {}

    /// Called when the element is detached. Subscriptions end here.
    fn unmount(&mut self) {}

    /// Current rendering of the element.
    fn render(&self) -> String;
}
