//! # Menu Loading
//!
//! The data-loading collaborator. Fetches the menu and writes it through the
//! store so subscribed views refresh.
//!
//! ```text
//!   MenuSource::fetch ──► validate_menu ──► store.set_menu ──► menu-changed
//!        │                     │
//!        └── Err               └── Err
//!             store untouched       store untouched
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use cafe_core::validation::validate_menu;
use cafe_core::{CoreError, MenuData};
use tracing::{debug, info, instrument, warn};

use crate::error::{ShellError, ShellResult};
use crate::store::{DeliveryReport, StateStore};

/// Supplies the menu.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Short description for logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> ShellResult<MenuData>;
}

/// Reads the menu from a JSON file.
#[derive(Debug, Clone)]
pub struct FileMenuSource {
    path: PathBuf,
}

impl FileMenuSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileMenuSource { path: path.into() }
    }
}

#[async_trait]
impl MenuSource for FileMenuSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> ShellResult<MenuData> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ShellError::MenuUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = contents.len(), "Menu file read");
        Ok(MenuData::from_json(&contents)?)
    }
}

/// Serves a menu held in memory (bundled data, tests).
#[derive(Debug, Clone)]
pub struct StaticMenuSource {
    menu: MenuData,
}

impl StaticMenuSource {
    pub fn new(menu: MenuData) -> Self {
        StaticMenuSource { menu }
    }

    /// Parses bundled JSON.
    pub fn from_json(json: &str) -> ShellResult<Self> {
        Ok(StaticMenuSource::new(MenuData::from_json(json)?))
    }
}

#[async_trait]
impl MenuSource for StaticMenuSource {
    fn describe(&self) -> String {
        "bundled".to_string()
    }

    async fn fetch(&self) -> ShellResult<MenuData> {
        Ok(self.menu.clone())
    }
}

/// Fetches, validates and writes the menu.
#[instrument(skip_all, fields(source = %source.describe()))]
pub async fn load_menu(store: &StateStore, source: &dyn MenuSource) -> ShellResult<DeliveryReport> {
    let menu = source.fetch().await.inspect_err(|e| warn!(error = %e, "Menu fetch failed"))?;

    validate_menu(&menu).map_err(|e| {
        warn!(error = %e, "Menu rejected");
        ShellError::Core(CoreError::Validation(e))
    })?;

    let products = menu.product_count();
    let report = store.set_menu(menu);
    info!(products, delivered = report.delivered, "Menu loaded");
    Ok(report)
}
