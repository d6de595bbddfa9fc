//! # History Bridge
//!
//! Connects the platform's navigation signals to the router.
//!
//! ## Signal Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Platform signal          Bridge                    Router              │
//! │  ───────────────          ──────                    ──────              │
//! │                                                                         │
//! │  click <a.navlink> ─────► prevent default ────────► navigate(href,      │
//! │                                                          User)          │
//! │                                                     (pushes entry)      │
//! │                                                                         │
//! │  click <a> (other) ─────► untouched, browser handles it                 │
//! │                                                                         │
//! │  back / forward ────────► entry.route ────────────► navigate(route,     │
//! │  (popstate)                                              Replay)        │
//! │                                                     (no push)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use cafe_core::NavigationEntry;
use tracing::{debug, warn};

use crate::error::ShellResult;
use crate::router::{NavigationOutcome, NavigationSource, Router};

/// A click on a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClick {
    pub href: String,
    /// Whether the link is a designated navigation link.
    pub navlink: bool,
    default_prevented: bool,
}

impl LinkClick {
    /// A click on a designated navigation link.
    pub fn navlink(href: impl Into<String>) -> Self {
        LinkClick {
            href: href.into(),
            navlink: true,
            default_prevented: false,
        }
    }

    /// A click on an ordinary link.
    pub fn external(href: impl Into<String>) -> Self {
        LinkClick {
            href: href.into(),
            navlink: false,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Reflects navigation into history and replays back/forward.
#[derive(Debug, Clone)]
pub struct HistoryBridge {
    router: Arc<Router>,
}

impl HistoryBridge {
    pub fn new(router: Arc<Router>) -> Self {
        HistoryBridge { router }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Handles a link click. Returns `None` for links the shell leaves to the
    /// platform.
    pub async fn handle_click(
        &self,
        click: &mut LinkClick,
    ) -> ShellResult<Option<NavigationOutcome>> {
        if !click.navlink {
            return Ok(None);
        }
        click.prevent_default();
        debug!(href = %click.href, "Navigation link clicked");

        let href = click.href.clone();
        self.router
            .navigate(&href, NavigationSource::User)
            .await
            .map(Some)
            .inspect_err(|err| warn!(href = %href, error = %err, "Link navigation failed"))
    }

    /// Handles a back/forward signal carrying the entry being restored.
    pub async fn handle_pop_state(
        &self,
        entry: Option<&NavigationEntry>,
    ) -> ShellResult<Option<NavigationOutcome>> {
        let Some(entry) = entry else {
            debug!("History signal without entry ignored");
            return Ok(None);
        };

        self.router
            .navigate(&entry.route, NavigationSource::Replay)
            .await
            .map(Some)
            .inspect_err(|err| warn!(route = %entry.route, error = %err, "History replay failed"))
    }

    /// Steps back in history and replays the entry.
    pub async fn back(&self) -> ShellResult<Option<NavigationOutcome>> {
        let entry = self.router.history().back();
        self.handle_pop_state(entry.as_ref()).await
    }

    /// Steps forward in history and replays the entry.
    pub async fn forward(&self) -> ShellResult<Option<NavigationOutcome>> {
        let entry = self.router.history().forward();
        self.handle_pop_state(entry.as_ref()).await
    }
}
