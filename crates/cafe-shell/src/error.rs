//! # Shell Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shell Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Navigation    │  │     Data                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ModuleLoad     │  │  Core (menu/cart)       │ │
//! │  │  ConfigLoad     │  │   └ LoadError   │  │  MenuUnavailable        │ │
//! │  │  ConfigSave     │  │  ViewMount      │  │  Json / Io              │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  HandlerError is separate: subscriber failures are isolated per        │
//! │  handler and never become a ShellError.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. The worst outcome of a failed navigation is that
//! the previous view stays mounted.

use cafe_core::{CoreError, ViewKind};
use thiserror::Error;

/// Result type alias for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Shell error type.
#[derive(Debug, Error)]
pub enum ShellError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid shell configuration.
    #[error("Invalid shell configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Navigation Errors
    // =========================================================================
    /// A view module could not be loaded. Nothing was mounted.
    #[error("Failed to load view {view}: {source}")]
    ModuleLoad {
        view: ViewKind,
        #[source]
        source: LoadError,
    },

    /// A view panicked while mounting. The previous view was put back.
    #[error("View {view} failed to mount: {reason}")]
    ViewMount { view: ViewKind, reason: String },

    // =========================================================================
    // Data Errors
    // =========================================================================
    /// Menu or cart rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The menu source could not supply data.
    #[error("Menu unavailable: {0}")]
    MenuUnavailable(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        ShellError::ConfigSaveFailed(err.to_string())
    }
}

/// Failure to load a view module.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The loader has no module for this view.
    #[error("no module registered for {0}")]
    Missing(ViewKind),

    /// The module was found but could not be initialized.
    #[error("module is corrupt: {0}")]
    Corrupt(String),

    /// Transport failure while fetching the module.
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Failure reported by a state-change subscriber.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError(message.into())
    }
}

impl From<CoreError> for HandlerError {
    fn from(err: CoreError) -> Self {
        HandlerError(err.to_string())
    }
}
