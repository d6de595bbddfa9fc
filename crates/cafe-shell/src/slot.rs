//! # Display Slot
//!
//! The single container that holds the mounted view. Only the router writes
//! to it, through [`DisplaySlot::change_page`]; everything else reads.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use cafe_core::{Route, ViewKind};
use tracing::{debug, error};

use crate::error::{ShellError, ShellResult};
use crate::lock;
use crate::view::ViewElement;

/// A view element together with the route it was mounted for.
pub struct MountedView {
    pub route: Route,
    pub param: Option<String>,
    element: Box<dyn ViewElement>,
}

impl MountedView {
    pub fn new(route: Route, param: Option<String>, element: Box<dyn ViewElement>) -> Self {
        MountedView {
            route,
            param,
            element,
        }
    }

    pub fn view(&self) -> ViewKind {
        self.element.kind()
    }
}

impl fmt::Debug for MountedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedView")
            .field("route", &self.route)
            .field("view", &self.view())
            .field("param", &self.param)
            .finish()
    }
}

/// Holds at most one mounted view.
#[derive(Default)]
pub struct DisplaySlot {
    mounted: Mutex<Option<MountedView>>,
    swaps: AtomicU64,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the mounted element (if any) and mounts `next` in its place.
    /// Returns the route of the removed view.
    ///
    /// If `next` panics while mounting, the removed view is mounted again and
    /// the slot is left as it was.
    pub(crate) fn change_page(&self, mut next: MountedView) -> ShellResult<Option<Route>> {
        let mut mounted = lock(&self.mounted);

        let mut previous = mounted.take();
        if let Some(old) = previous.as_mut() {
            old.element.unmount();
        }

        debug!(
            from = ?previous.as_ref().map(|old| old.route.as_str()),
            to = %next.route,
            view = %next.view(),
            "Changing page"
        );

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| next.element.mount())) {
            let view = next.view();
            let reason = panic_reason(payload.as_ref());
            error!(%view, %reason, "View panicked while mounting");
            if let Some(mut old) = previous {
                match panic::catch_unwind(AssertUnwindSafe(|| old.element.mount())) {
                    Ok(()) => *mounted = Some(old),
                    Err(_) => error!(view = %old.view(), "Previous view failed to remount"),
                }
            }
            return Err(ShellError::ViewMount { view, reason });
        }

        *mounted = Some(next);
        self.swaps.fetch_add(1, Ordering::Relaxed);

        Ok(previous.map(|old| old.route))
    }

    /// Route of the mounted view.
    pub fn current_route(&self) -> Option<Route> {
        lock(&self.mounted).as_ref().map(|m| m.route.clone())
    }

    /// Kind of the mounted view.
    pub fn current_view(&self) -> Option<ViewKind> {
        lock(&self.mounted).as_ref().map(MountedView::view)
    }

    /// Parameter of the mounted view.
    pub fn current_param(&self) -> Option<String> {
        lock(&self.mounted).as_ref().and_then(|m| m.param.clone())
    }

    /// Renders the mounted element.
    pub fn render(&self) -> Option<String> {
        lock(&self.mounted).as_ref().map(|m| m.element.render())
    }

    /// Number of completed swaps.
    pub fn swap_count(&self) -> u64 {
        self.swaps.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.mounted).is_none()
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl fmt::Debug for DisplaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplaySlot")
            .field("mounted", &*lock(&self.mounted))
            .field("swaps", &self.swap_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TracedElement {
        kind: ViewKind,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl ViewElement for TracedElement {
        fn kind(&self) -> ViewKind {
            self.kind
        }

        fn mount(&mut self) {
            self.events.lock().unwrap().push(format!("mount {}", self.kind));
        }

        fn unmount(&mut self) {
            self.events.lock().unwrap().push(format!("unmount {}", self.kind));
        }

        fn render(&self) -> String {
            format!("<{}>", self.kind)
        }
    }

    fn traced(kind: ViewKind, route: &str, events: &Arc<Mutex<Vec<String>>>) -> MountedView {
        MountedView::new(
            Route::new(route),
            None,
            Box::new(TracedElement {
                kind,
                events: events.clone(),
            }),
        )
    }

    #[test]
    fn test_change_page_replaces_and_runs_lifecycle() {
        let slot = DisplaySlot::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        assert!(slot.is_empty());
        assert!(slot.render().is_none());

        assert_eq!(slot.change_page(traced(ViewKind::Menu, "/", &events)).unwrap(), None);
        let previous = slot
            .change_page(traced(ViewKind::Order, "/order", &events))
            .unwrap();

        assert_eq!(previous, Some(Route::new("/")));
        assert_eq!(slot.current_view(), Some(ViewKind::Order));
        assert_eq!(slot.render().as_deref(), Some("<order-page>"));
        assert_eq!(slot.swap_count(), 2);
        assert_eq!(
            *events.lock().unwrap(),
            vec!["mount menu-page", "unmount menu-page", "mount order-page"]
        );
    }

    struct Exploding;

    impl ViewElement for Exploding {
        fn kind(&self) -> ViewKind {
            ViewKind::Order
        }

        fn mount(&mut self) {
            panic!("cart total overflowed");
        }

        fn render(&self) -> String {
            "boom".to_string()
        }
    }

    #[test]
    fn test_panicking_mount_puts_previous_view_back() {
        let slot = DisplaySlot::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        slot.change_page(traced(ViewKind::Menu, "/", &events)).unwrap();

        let err = slot
            .change_page(MountedView::new(Route::new("/order"), None, Box::new(Exploding)))
            .unwrap_err();

        match err {
            ShellError::ViewMount { view, reason } => {
                assert_eq!(view, ViewKind::Order);
                assert_eq!(reason, "cart total overflowed");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(slot.current_route(), Some(Route::new("/")));
        assert_eq!(slot.render().as_deref(), Some("<menu-page>"));
        assert_eq!(slot.swap_count(), 1);
        assert_eq!(
            *events.lock().unwrap(),
            vec!["mount menu-page", "unmount menu-page", "mount menu-page"]
        );
    }
}
