//! # Shell Assembly
//!
//! Wires the store, registry, router and bridge together from a
//! [`ShellConfig`].
//!
//! ```text
//!   ShellBuilder::new(loader)
//!       .config(config)
//!       .home_module(menu_module)       ← pre-loaded, never takes the async path
//!       .view_transitions(capability)   ← optional
//!       .build()?
//!            │
//!            ▼
//!   Shell { store, registry, router, bridge, history }
//!            │
//!            └── start().await  → router.init(config.shell.home_route)
//! ```

use std::fmt;
use std::sync::Arc;

use cafe_core::resolve;
use tracing::{debug, info, warn};

use crate::bridge::HistoryBridge;
use crate::config::ShellConfig;
use crate::document::Document;
use crate::error::{ShellError, ShellResult};
use crate::history::{HistoryBackend, MemoryHistory};
use crate::menu::{self, MenuSource};
use crate::registry::{ModuleRegistry, ViewLoader};
use crate::router::{NavigationOutcome, Router};
use crate::slot::DisplaySlot;
use crate::store::{DeliveryReport, StateStore};
use crate::transition::{select_strategy, ViewTransitions};
use crate::view::ViewModule;

/// Builder for [`Shell`].
pub struct ShellBuilder {
    loader: Arc<dyn ViewLoader>,
    config: ShellConfig,
    home_module: Option<Arc<dyn ViewModule>>,
    store: Option<Arc<StateStore>>,
    history: Option<Arc<dyn HistoryBackend>>,
    capability: Option<Arc<dyn ViewTransitions>>,
}

impl ShellBuilder {
    pub fn new(loader: Arc<dyn ViewLoader>) -> Self {
        ShellBuilder {
            loader,
            config: ShellConfig::default(),
            home_module: None,
            store: None,
            history: None,
            capability: None,
        }
    }

    pub fn config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    /// Module for the home view, installed before the first navigation.
    pub fn home_module(mut self, module: Arc<dyn ViewModule>) -> Self {
        self.home_module = Some(module);
        self
    }

    /// Uses an existing store instead of an empty one.
    pub fn store(mut self, store: Arc<StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses a platform history instead of [`MemoryHistory`].
    pub fn history(mut self, history: Arc<dyn HistoryBackend>) -> Self {
        self.history = Some(history);
        self
    }

    /// The platform's view-transition capability, if it has one.
    pub fn view_transitions(mut self, capability: Arc<dyn ViewTransitions>) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn build(self) -> ShellResult<Shell> {
        self.config.validate()?;

        let home_view = resolve(self.config.home_route())
            .map(|r| r.view)
            .ok_or_else(|| ShellError::InvalidConfig("home_route is unroutable".into()))?;

        let registry = Arc::new(ModuleRegistry::new(self.loader));
        match self.home_module {
            Some(module) if module.kind() != home_view => {
                return Err(ShellError::InvalidConfig(format!(
                    "home module is {} but home_route resolves to {}",
                    module.kind(),
                    home_view
                )));
            }
            Some(module) => {
                registry.preload(module);
                debug!(view = %home_view, "Home view pre-loaded");
            }
            None => warn!(view = %home_view, "No home module given, it will load on demand"),
        }

        let store = self.store.unwrap_or_default();
        let history = self
            .history
            .unwrap_or_else(|| Arc::new(MemoryHistory::new()));
        let transitions = select_strategy(
            self.capability,
            self.config.transition_mode(),
            self.config.transition_duration(),
        );

        let router = Arc::new(Router::new(
            store.clone(),
            registry.clone(),
            history.clone(),
            Arc::new(DisplaySlot::new()),
            Arc::new(Document::new(home_view.chrome().title)),
            transitions,
        ));
        let bridge = HistoryBridge::new(router.clone());

        info!(
            home = self.config.home_route(),
            transitions = router.transition_name(),
            "Shell assembled"
        );

        Ok(Shell {
            config: self.config,
            store,
            registry,
            router,
            bridge,
            history,
        })
    }
}

/// A fully wired shell.
pub struct Shell {
    config: ShellConfig,
    store: Arc<StateStore>,
    registry: Arc<ModuleRegistry>,
    router: Arc<Router>,
    bridge: HistoryBridge,
    history: Arc<dyn HistoryBackend>,
}

impl Shell {
    /// Mounts the configured home route.
    pub async fn start(&self) -> ShellResult<NavigationOutcome> {
        self.router.init(self.config.home_route()).await
    }

    /// Fetches the menu and writes it to the store.
    pub async fn load_menu(&self, source: &dyn MenuSource) -> ShellResult<DeliveryReport> {
        menu::load_menu(&self.store, source).await
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn bridge(&self) -> &HistoryBridge {
        &self.bridge
    }

    pub fn history(&self) -> &Arc<dyn HistoryBackend> {
        &self.history
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("home_route", &self.config.home_route())
            .field("router", &self.router)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
