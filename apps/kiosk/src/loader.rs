//! # Kiosk View Loader
//!
//! Hands out the text view modules. A configurable delay stands in for the
//! network fetch a browser would do for a lazily imported module, so the
//! loading path (and overlapping navigations) can be exercised by hand.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cafe_core::ViewKind;
use cafe_shell::{LoadError, ViewLoader, ViewModule};
use tracing::debug;

use crate::views::{DetailsModule, MenuModule, OrderModule};

#[derive(Debug, Clone, Default)]
pub struct KioskViewLoader {
    delay: Duration,
}

impl KioskViewLoader {
    pub fn new(delay: Duration) -> Self {
        KioskViewLoader { delay }
    }

    /// The module for a view, without any delay.
    pub fn module(view: ViewKind) -> Arc<dyn ViewModule> {
        match view {
            ViewKind::Menu => Arc::new(MenuModule),
            ViewKind::Order => Arc::new(OrderModule),
            ViewKind::Details => Arc::new(DetailsModule),
        }
    }
}

#[async_trait]
impl ViewLoader for KioskViewLoader {
    async fn load(&self, view: ViewKind) -> Result<Arc<dyn ViewModule>, LoadError> {
        if !self.delay.is_zero() {
            debug!(%view, delay_ms = self.delay.as_millis() as u64, "Simulating module fetch");
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::module(view))
    }
}
