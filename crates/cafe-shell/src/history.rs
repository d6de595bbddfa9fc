//! # History Stack
//!
//! The platform history the router pushes into and the bridge traverses.
//!
//! ## MemoryHistory
//! ```text
//!   entries:  [ "/" , "/order" , "/product-3" ]
//!                        ▲
//!                      cursor          back()    → cursor - 1, returns "/"
//!                                      forward() → cursor + 1, returns "/product-3"
//!                                      push(x)   → drops everything after cursor,
//!                                                  appends x, cursor = last
//! ```

use std::sync::Mutex;

use cafe_core::NavigationEntry;
use tracing::trace;

use crate::lock;

/// A history stack.
pub trait HistoryBackend: Send + Sync {
    /// Records a forward navigation.
    fn push(&self, entry: NavigationEntry);

    /// Moves back one entry and returns it, if possible.
    fn back(&self) -> Option<NavigationEntry>;

    /// Moves forward one entry and returns it, if possible.
    fn forward(&self) -> Option<NavigationEntry>;

    /// The entry at the cursor.
    fn current(&self) -> Option<NavigationEntry>;
}

#[derive(Debug, Default)]
struct Stack {
    entries: Vec<NavigationEntry>,
    cursor: Option<usize>,
}

/// In-process history stack.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<NavigationEntry> {
        lock(&self.stack).entries.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.stack).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn can_go_back(&self) -> bool {
        matches!(lock(&self.stack).cursor, Some(c) if c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        let stack = lock(&self.stack);
        matches!(stack.cursor, Some(c) if c + 1 < stack.entries.len())
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&self, entry: NavigationEntry) {
        let mut stack = lock(&self.stack);
        let keep = stack.cursor.map_or(0, |c| c + 1);
        stack.entries.truncate(keep);
        trace!(route = %entry.route, depth = keep + 1, "History push");
        stack.entries.push(entry);
        stack.cursor = Some(keep);
    }

    fn back(&self) -> Option<NavigationEntry> {
        let mut stack = lock(&self.stack);
        let cursor = stack.cursor.filter(|&c| c > 0)? - 1;
        stack.cursor = Some(cursor);
        stack.entries.get(cursor).cloned()
    }

    fn forward(&self) -> Option<NavigationEntry> {
        let mut stack = lock(&self.stack);
        let cursor = stack.cursor? + 1;
        if cursor >= stack.entries.len() {
            return None;
        }
        stack.cursor = Some(cursor);
        stack.entries.get(cursor).cloned()
    }

    fn current(&self) -> Option<NavigationEntry> {
        let stack = lock(&self.stack);
        stack.cursor.and_then(|c| stack.entries.get(c).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(history: &MemoryHistory) -> Vec<String> {
        history.entries().into_iter().map(|e| e.route).collect()
    }

    #[test]
    fn test_push_back_forward() {
        let history = MemoryHistory::new();
        assert!(history.back().is_none());
        assert!(history.current().is_none());

        history.push(NavigationEntry::new("/"));
        history.push(NavigationEntry::new("/order"));
        history.push(NavigationEntry::new("/product-1"));

        assert_eq!(history.back().unwrap().route, "/order");
        assert_eq!(history.back().unwrap().route, "/");
        assert!(history.back().is_none());
        assert!(!history.can_go_back());

        assert_eq!(history.forward().unwrap().route, "/order");
        assert!(history.can_go_forward());
        assert_eq!(history.current().unwrap().route, "/order");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let history = MemoryHistory::new();
        history.push(NavigationEntry::new("/"));
        history.push(NavigationEntry::new("/order"));
        history.back();

        history.push(NavigationEntry::new("/product-2"));

        assert_eq!(routes(&history), vec!["/", "/product-2"]);
        assert!(history.forward().is_none());
    }
}
