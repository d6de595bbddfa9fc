//! # Page Transitions
//!
//! Animating a page swap is progressive enhancement. The platform may offer
//! a view-transition capability; if it does, the swap runs inside its
//! callback, otherwise the swap runs right away. The choice is made once at
//! startup by [`select_strategy`].
//!
//! ```text
//!   select_strategy(capability, mode)
//!        │
//!        ├── Off                        → ImmediateSwap
//!        ├── Auto + no capability       → ImmediateSwap
//!        ├── Auto + capability          → AnimatedSwap
//!        └── Animated + no capability   → ImmediateSwap (warn!)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::TransitionMode;

/// A platform API that can animate a DOM update.
pub trait ViewTransitions: Send + Sync {
    /// Runs `update` as part of an animated transition.
    fn start(&self, duration: Duration, update: &mut dyn FnMut());
}

/// How a page swap is executed.
pub trait TransitionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs `change_page`, possibly inside an animation.
    fn run(&self, change_page: &mut dyn FnMut());
}

/// Runs the swap immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateSwap;

impl TransitionStrategy for ImmediateSwap {
    fn name(&self) -> &'static str {
        "immediate"
    }

    fn run(&self, change_page: &mut dyn FnMut()) {
        change_page();
    }
}

/// Runs the swap inside the platform's transition callback.
pub struct AnimatedSwap {
    capability: Arc<dyn ViewTransitions>,
    duration: Duration,
}

impl AnimatedSwap {
    pub fn new(capability: Arc<dyn ViewTransitions>, duration: Duration) -> Self {
        AnimatedSwap {
            capability,
            duration,
        }
    }
}

impl TransitionStrategy for AnimatedSwap {
    fn name(&self) -> &'static str {
        "animated"
    }

    fn run(&self, change_page: &mut dyn FnMut()) {
        debug!(duration_ms = self.duration.as_millis() as u64, "Starting view transition");
        self.capability.start(self.duration, change_page);
    }
}

/// Picks the swap strategy for this runtime.
pub fn select_strategy(
    capability: Option<Arc<dyn ViewTransitions>>,
    mode: TransitionMode,
    duration: Duration,
) -> Arc<dyn TransitionStrategy> {
    match (mode, capability) {
        (TransitionMode::Off, _) => Arc::new(ImmediateSwap),
        (_, Some(capability)) => Arc::new(AnimatedSwap::new(capability, duration)),
        (TransitionMode::Animated, None) => {
            warn!("Animated transitions requested but not supported; swapping immediately");
            Arc::new(ImmediateSwap)
        }
        (TransitionMode::Auto, None) => Arc::new(ImmediateSwap),
    }
}
