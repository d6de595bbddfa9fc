//! # cafe-shell: Routing + Reactive State Engine
//!
//! The single-page shell of the cafe ordering app. It routes between views,
//! owns the shared application state and keeps mounted views in sync with it
//! through change notifications.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cafe Shell Architecture                         │
//! │                                                                         │
//! │   link click / back / forward                                          │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  ┌────────────────────┐      navigate(target, source)                  │
//! │  │   HistoryBridge    │ ──────────────────────┐                        │
//! │  └────────────────────┘                       ▼                        │
//! │                                   ┌────────────────────────┐           │
//! │   HistoryBackend ◄── push ─────── │        Router          │           │
//! │                                   │ resolve → load → chrome│           │
//! │                                   │ → change_page → scroll │           │
//! │                                   └───┬───────────────┬────┘           │
//! │                          ensure_loaded│               │ run(change_page)│
//! │                                       ▼               ▼                 │
//! │                         ┌──────────────────┐  ┌──────────────────────┐ │
//! │                         │  ModuleRegistry  │  │ TransitionStrategy   │ │
//! │                         │  one load / view │  │ Animated | Immediate │ │
//! │                         └──────────────────┘  └──────────┬───────────┘ │
//! │                                                          ▼              │
//! │                                               ┌──────────────────────┐ │
//! │     views read + subscribe ─────────────────► │    DisplaySlot       │ │
//! │            │                                  │  (one mounted view)  │ │
//! │            ▼                                  └──────────────────────┘ │
//! │  ┌────────────────────┐                                                │
//! │  │    StateStore      │  write → commit → notify (registration order)  │
//! │  │    menu, cart      │                                                │
//! │  └────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! ### Engine
//! - [`store`] - `StateStore` with typed change notifications
//! - [`registry`] - `ModuleRegistry`, on-demand view activation
//! - [`router`] - `Router`, path-to-view dispatch
//! - [`bridge`] - `HistoryBridge`, link clicks and back/forward replay
//!
//! ### Platform Seams
//! - [`view`] - `ViewModule` / `ViewElement` contracts
//! - [`slot`] - The display slot
//! - [`document`] - Title, theme color, scroll offset
//! - [`history`] - `HistoryBackend` and `MemoryHistory`
//! - [`transition`] - Animated or immediate page swaps
//!
//! ### Wiring
//! - [`config`] - `ShellConfig` (TOML + environment)
//! - [`menu`] - Menu sources and loading
//! - [`shell`] - `ShellBuilder` and `Shell`
//! - [`error`] - Shell error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cafe_shell::{FileMenuSource, ShellBuilder, ShellConfig};
//!
//! let config = ShellConfig::load_or_default(None);
//! let shell = ShellBuilder::new(loader)
//!     .config(config)
//!     .home_module(menu_module)
//!     .build()?;
//!
//! shell.load_menu(&FileMenuSource::new("menu.json")).await?;
//! shell.start().await?;
//!
//! shell.bridge().handle_click(&mut LinkClick::navlink("/order")).await?;
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bridge;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod menu;
pub mod registry;
pub mod router;
pub mod shell;
pub mod slot;
pub mod store;
pub mod transition;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use bridge::{HistoryBridge, LinkClick};
pub use config::{ShellConfig, TransitionMode};
pub use document::Document;
pub use error::{HandlerError, LoadError, ShellError, ShellResult};
pub use history::{HistoryBackend, MemoryHistory};
pub use menu::{load_menu, FileMenuSource, MenuSource, StaticMenuSource};
pub use registry::{ModuleRegistry, ModuleState, ViewLoader};
pub use router::{NavigationOutcome, NavigationSource, Router};
pub use shell::{Shell, ShellBuilder};
pub use slot::{DisplaySlot, MountedView};
pub use store::{DeliveryReport, HandlerResult, StateStore, StateUpdate, SubscriptionId};
pub use transition::{select_strategy, AnimatedSwap, ImmediateSwap, TransitionStrategy, ViewTransitions};
pub use view::{ViewContext, ViewElement, ViewModule};

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// No user callback runs while one of the shell's locks is held, except view
/// mount/unmount under the slot lock (see [`ViewElement`] for what they may
/// not do there). Panics in those are caught inside the lock, so the guarded
/// data is never left half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
