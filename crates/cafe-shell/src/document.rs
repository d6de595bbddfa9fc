//! # Document Chrome
//!
//! The parts of the page the router touches besides the display slot: the
//! title, the theme-color hint and the horizontal scroll offset.

use std::sync::Mutex;

use cafe_core::ViewChrome;

use crate::lock;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Chrome {
    title: String,
    theme_color: String,
    scroll_x: i32,
}

/// Page-level chrome state.
#[derive(Debug)]
pub struct Document {
    chrome: Mutex<Chrome>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Document {
            chrome: Mutex::new(Chrome {
                title: title.into(),
                theme_color: String::new(),
                scroll_x: 0,
            }),
        }
    }

    /// Applies a view's title and theme color.
    pub fn apply_chrome(&self, chrome: ViewChrome) {
        let mut state = lock(&self.chrome);
        state.title = chrome.title.to_string();
        state.theme_color = chrome.theme_color.to_string();
    }

    pub fn title(&self) -> String {
        lock(&self.chrome).title.clone()
    }

    pub fn theme_color(&self) -> String {
        lock(&self.chrome).theme_color.clone()
    }

    pub fn scroll_x(&self) -> i32 {
        lock(&self.chrome).scroll_x
    }

    /// Scrolls horizontally (e.g. a swiped category carousel).
    pub fn scroll_to_x(&self, x: i32) {
        lock(&self.chrome).scroll_x = x;
    }

    pub fn reset_scroll_x(&self) {
        self.scroll_to_x(0);
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new("")
    }
}
