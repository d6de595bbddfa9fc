//! # Router
//!
//! Maps a path to a view and mounts it into the display slot.
//!
//! ## Navigation Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Router::navigate(target, source)                   │
//! │                                                                         │
//! │  1. source == User?  ──► history.push({ route: target })               │
//! │  2. resolve(target)  ──► None? ──► Unroutable (nothing else happens)   │
//! │     take a generation ticket                                           │
//! │  3. registry.ensure_loaded(view).await   ◄── only suspension point     │
//! │     ticket no longer latest? ──► Superseded (nothing mounted)          │
//! │       └── Err? ──► return ShellError::ModuleLoad, old view stays       │
//! │  4. document.apply_chrome(view.chrome())                               │
//! │  5+6. transitions.run(change_page)                                     │
//! │       └── change_page: slot.remove(old) + slot.append(new)             │
//! │           └── mount panicked? ──► old view back, ShellError::ViewMount │
//! │  7. document.reset_scroll_x()                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Navigations
//! Navigations are not queued. If a second navigation starts while the first
//! is still waiting on its module load, the first one is superseded: when its
//! load finishes (or fails) it returns [`NavigationOutcome::Superseded`]
//! without touching the chrome or the slot. Unroutable paths never supersede. The latest request always wins, which keeps the
//! mounted view in line with the top of the history stack.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cafe_core::{resolve, NavigationEntry, Route, ViewKind};
use tracing::{debug, info, instrument, warn};

use crate::document::Document;
use crate::error::ShellResult;
use crate::history::HistoryBackend;
use crate::registry::ModuleRegistry;
use crate::slot::{DisplaySlot, MountedView};
use crate::store::StateStore;
use crate::transition::TransitionStrategy;
use crate::view::ViewContext;

/// Who asked for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSource {
    /// A link click or a programmatic call. Pushes a history entry.
    User,
    /// A back/forward replay. Never pushes.
    Replay,
}

impl NavigationSource {
    fn records_history(self) -> bool {
        matches!(self, NavigationSource::User)
    }
}

/// What a navigation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The view was mounted.
    Mounted {
        view: ViewKind,
        param: Option<String>,
    },
    /// No view handles the path. Nothing changed.
    Unroutable,
    /// A newer navigation started while this one was loading.
    Superseded,
}

/// Path-to-view dispatcher. The only writer of the display slot.
pub struct Router {
    store: Arc<StateStore>,
    registry: Arc<ModuleRegistry>,
    history: Arc<dyn HistoryBackend>,
    slot: Arc<DisplaySlot>,
    document: Arc<Document>,
    transitions: Arc<dyn TransitionStrategy>,
    generation: AtomicU64,
}

impl Router {
    pub fn new(
        store: Arc<StateStore>,
        registry: Arc<ModuleRegistry>,
        history: Arc<dyn HistoryBackend>,
        slot: Arc<DisplaySlot>,
        document: Arc<Document>,
        transitions: Arc<dyn TransitionStrategy>,
    ) -> Self {
        Router {
            store,
            registry,
            history,
            slot,
            document,
            transitions,
            generation: AtomicU64::new(0),
        }
    }

    /// First navigation at startup.
    pub async fn init(&self, initial_path: &str) -> ShellResult<NavigationOutcome> {
        info!(
            path = initial_path,
            transitions = self.transitions.name(),
            "Router starting"
        );
        self.navigate(initial_path, NavigationSource::User).await
    }

    /// Programmatic navigation. Same as a link click.
    pub async fn go(&self, target: &str) -> ShellResult<NavigationOutcome> {
        self.navigate(target, NavigationSource::User).await
    }

    /// Navigates to `target`.
    #[instrument(skip(self))]
    pub async fn navigate(
        &self,
        target: &str,
        source: NavigationSource,
    ) -> ShellResult<NavigationOutcome> {
        if source.records_history() {
            self.history.push(NavigationEntry::new(target));
        }

        let Some(resolved) = resolve(target) else {
            debug!("Unroutable path ignored");
            return Ok(NavigationOutcome::Unroutable);
        };
        let view = resolved.view;

        // Only routable navigations take a ticket, so unroutable paths never
        // cancel a pending mount.
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let loaded = self.registry.ensure_loaded(view).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(%view, failed = loaded.is_err(), "Navigation superseded by a newer one");
            return Ok(NavigationOutcome::Superseded);
        }

        let module = match loaded {
            Ok(module) => module,
            Err(err) => {
                warn!(%view, error = %err, "Navigation failed, keeping current view");
                return Err(err);
            }
        };

        self.document.apply_chrome(view.chrome());

        let route = Route::new(target);
        let element = module.create(ViewContext {
            store: self.store.clone(),
            route: route.clone(),
            param: resolved.param.clone(),
        });
        let mut pending = Some(MountedView::new(route, resolved.param.clone(), element));
        let mut swapped = None;

        let slot = &self.slot;
        self.transitions.run(&mut || {
            if let Some(next) = pending.take() {
                swapped = Some(slot.change_page(next));
            }
        });
        if let Some(next) = pending.take() {
            warn!(
                strategy = self.transitions.name(),
                "Transition skipped the update, swapping directly"
            );
            swapped = Some(self.slot.change_page(next));
        }

        if let Some(Err(err)) = swapped {
            warn!(%view, error = %err, "Mount failed, keeping current view");
            if let Some(current) = self.slot.current_view() {
                self.document.apply_chrome(current.chrome());
            }
            return Err(err);
        }

        self.document.reset_scroll_x();

        info!(%view, param = ?resolved.param, "Navigated");
        Ok(NavigationOutcome::Mounted {
            view,
            param: resolved.param,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    pub fn slot(&self) -> &Arc<DisplaySlot> {
        &self.slot
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn history(&self) -> &Arc<dyn HistoryBackend> {
        &self.history
    }

    pub fn transition_name(&self) -> &'static str {
        self.transitions.name()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.slot.current_route()
    }

    pub fn current_view(&self) -> Option<ViewKind> {
        self.slot.current_view()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("mounted", &self.slot.current_route())
            .field("transitions", &self.transitions.name())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
