//! Window chrome seam
//!
//! The chrome is everything around the terminals: container border, tab strip
//! and status bar. Styling reaches it only through this trait, which keeps the
//! application logic independent of the windowing layer.

use h3v3n_theme::border_stylesheet;

/// Receiver for styling and status updates
pub trait Chrome {
    /// Replace the whole stylesheet (never incremental)
    fn replace_stylesheet(&mut self, css: &str);

    /// Override the container border color (animation layer, not persisted)
    fn set_border_color(&mut self, hex: &str);

    /// Replace the status bar text
    fn set_status(&mut self, text: &str);

    /// Tab strip labels and the active index
    fn set_tabs(&mut self, _titles: &[String], _active: usize) {}
}

/// Last values pushed to a chrome
///
/// Used directly as a headless chrome and as the backing store of the window
/// chrome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromeState {
    pub stylesheet: String,
    /// Border override rule produced by the animation
    pub border_css: String,
    pub border_color: Option<String>,
    pub status: String,
    pub tabs: Vec<String>,
    pub active_tab: usize,
    /// Number of full stylesheet replacements so far
    pub stylesheet_updates: usize,
}

impl ChromeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stylesheet with the animated border layered on top
    pub fn effective_stylesheet(&self) -> String {
        format!("{}{}", self.stylesheet, self.border_css)
    }
}

impl Chrome for ChromeState {
    fn replace_stylesheet(&mut self, css: &str) {
        self.stylesheet = css.to_string();
        self.stylesheet_updates += 1;
    }

    fn set_border_color(&mut self, hex: &str) {
        self.border_css = border_stylesheet(hex);
        self.border_color = Some(hex.to_string());
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_tabs(&mut self, titles: &[String], active: usize) {
        self.tabs = titles.to_vec();
        self.active_tab = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_is_full_replacement() {
        let mut chrome = ChromeState::new();
        chrome.replace_stylesheet("a { color: #fff; }\n");
        chrome.replace_stylesheet("b { color: #000; }\n");
        assert_eq!(chrome.stylesheet, "b { color: #000; }\n");
        assert_eq!(chrome.stylesheet_updates, 2);
    }

    #[test]
    fn test_border_layered_after_stylesheet() {
        let mut chrome = ChromeState::new();
        chrome.replace_stylesheet("x {}\n");
        chrome.set_border_color("#ff4c4c");
        assert_eq!(
            chrome.effective_stylesheet(),
            "x {}\n#main_container { border-color: #ff4c4c; margin: 6px; }\n"
        );
    }

    #[test]
    fn test_border_survives_stylesheet_replacement() {
        let mut chrome = ChromeState::new();
        chrome.set_border_color("#ff4c4c");
        chrome.replace_stylesheet("y {}\n");
        assert!(chrome.effective_stylesheet().ends_with("border-color: #ff4c4c; margin: 6px; }\n"));
    }
}
