//! # Module Registry
//!
//! Loads a view's module the first time it is needed and hands out the same
//! module afterwards.
//!
//! ## Per-View State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐  ensure_loaded   ┌───────────┐   Ok    ┌───────────┐   │
//! │   │ NotLoaded │ ───────────────► │  Loading  │ ──────► │  Loaded   │   │
//! │   └───────────┘                  └─────┬─────┘         └───────────┘   │
//! │         ▲                              │ Err                            │
//! │         └──────────────────────────────┘                                │
//! │                                                                         │
//! │  While Loading, every caller awaits the SAME shared future, so          │
//! │  concurrent requests observe one load and one outcome.                  │
//! │  A failed load goes back to NotLoaded: the next request retries.        │
//! │  preload() jumps straight to Loaded (used for the home view).           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cafe_core::ViewKind;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

use crate::error::{LoadError, ShellError, ShellResult};
use crate::lock;
use crate::view::ViewModule;

/// Fetches the code of a view. May be slow.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    async fn load(&self, view: ViewKind) -> Result<Arc<dyn ViewModule>, LoadError>;
}

/// Load state of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    NotLoaded,
    Loading,
    Loaded,
}

type LoadResult = Result<Arc<dyn ViewModule>, LoadError>;
type PendingLoad = Shared<BoxFuture<'static, LoadResult>>;

enum Entry {
    Loading(PendingLoad),
    Loaded(Arc<dyn ViewModule>),
}

/// On-demand activator for view modules.
pub struct ModuleRegistry {
    loader: Arc<dyn ViewLoader>,
    entries: Mutex<HashMap<ViewKind, Entry>>,
}

impl ModuleRegistry {
    pub fn new(loader: Arc<dyn ViewLoader>) -> Self {
        ModuleRegistry {
            loader,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Installs an already-resolved module. Returns false if the view was
    /// already loaded, in which case the existing module is kept.
    pub fn preload(&self, module: Arc<dyn ViewModule>) -> bool {
        let view = module.kind();
        let mut entries = lock(&self.entries);
        if matches!(entries.get(&view), Some(Entry::Loaded(_))) {
            return false;
        }
        entries.insert(view, Entry::Loaded(module));
        debug!(%view, "View module preloaded");
        true
    }

    /// Current state of a view.
    pub fn state(&self, view: ViewKind) -> ModuleState {
        match lock(&self.entries).get(&view) {
            None => ModuleState::NotLoaded,
            Some(Entry::Loading(_)) => ModuleState::Loading,
            Some(Entry::Loaded(_)) => ModuleState::Loaded,
        }
    }

    pub fn is_loaded(&self, view: ViewKind) -> bool {
        self.state(view) == ModuleState::Loaded
    }

    /// Makes sure a view's module is available and returns it.
    ///
    /// The first call starts the load. Calls made while it runs join it.
    /// Calls made after it succeeded return the cached module immediately.
    pub async fn ensure_loaded(&self, view: ViewKind) -> ShellResult<Arc<dyn ViewModule>> {
        let pending = {
            let mut entries = lock(&self.entries);
            match entries.get(&view) {
                Some(Entry::Loaded(module)) => return Ok(module.clone()),
                Some(Entry::Loading(pending)) => {
                    debug!(%view, "Joining in-flight module load");
                    pending.clone()
                }
                None => {
                    info!(%view, "Loading view module");
                    let pending = start_load(self.loader.clone(), view);
                    entries.insert(view, Entry::Loading(pending.clone()));
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut entries = lock(&self.entries);
        let still_ours = matches!(entries.get(&view), Some(Entry::Loading(p)) if p.ptr_eq(&pending));

        match result {
            Ok(module) => {
                if still_ours {
                    info!(%view, "View module loaded");
                    entries.insert(view, Entry::Loaded(module.clone()));
                }
                Ok(module)
            }
            Err(source) => {
                if still_ours {
                    warn!(%view, error = %source, "View module failed to load");
                    entries.remove(&view);
                }
                Err(ShellError::ModuleLoad { view, source })
            }
        }
    }
}

fn start_load(loader: Arc<dyn ViewLoader>, view: ViewKind) -> PendingLoad {
    async move {
        let module = loader.load(view).await?;
        if module.kind() != view {
            return Err(LoadError::Corrupt(format!(
                "loader returned {} for {}",
                module.kind(),
                view
            )));
        }
        Ok(module)
    }
    .boxed()
    .shared()
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<(ViewKind, ModuleState)> = ViewKind::ALL
            .iter()
            .map(|&view| (view, self.state(view)))
            .collect();
        f.debug_struct("ModuleRegistry")
            .field("states", &states)
            .finish_non_exhaustive()
    }
}
