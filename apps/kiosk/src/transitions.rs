//! Terminal stand-in for the view-transition capability: clears the screen
//! around the swap so the new view appears in place of the old one.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use cafe_shell::ViewTransitions;
use tracing::trace;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Default)]
pub struct TerminalTransitions;

impl TerminalTransitions {
    /// The capability exists only when stdout is an interactive terminal.
    pub fn detect() -> Option<Self> {
        io::stdout().is_terminal().then_some(TerminalTransitions)
    }
}

impl ViewTransitions for TerminalTransitions {
    fn start(&self, duration: Duration, update: &mut dyn FnMut()) {
        trace!(duration_ms = duration.as_millis() as u64, "Terminal transition");
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(CLEAR_SCREEN.as_bytes());
        let _ = stdout.flush();
        drop(stdout);
        update();
    }
}
