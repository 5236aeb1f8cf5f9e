//! Window chrome
//!
//! Holds the native window and the last styling pushed to it. The HUD line is
//! mirrored into the window title so it stays visible without a renderer.

use std::sync::Arc;

use h3v3n_core::Size;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::chrome::{Chrome, ChromeState};
use crate::state::FontDescriptor;

pub const WINDOW_TITLE: &str = "H3V3N TERMINAL - Pro Edition";
pub const WINDOW_WIDTH: f64 = 1200.0;
pub const WINDOW_HEIGHT: f64 = 850.0;

/// Height reserved for the tab strip and status bar, in logical pixels
const CHROME_HEIGHT: f64 = 36.0 + 24.0;
/// Border plus margin on each side, in logical pixels
const CHROME_INSET: f64 = 3.0 + 6.0;

/// Chrome backed by a winit window
#[derive(Default)]
pub struct WindowChrome {
    window: Option<Arc<Window>>,
    state: ChromeState,
}

impl WindowChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the window once the event loop has created it
    pub fn attach(&mut self, window: Arc<Window>) {
        window.set_title(&self.title());
        self.window = Some(window);
    }

    pub fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    pub fn state(&self) -> &ChromeState {
        &self.state
    }

    pub fn title(&self) -> String {
        title_with_status(&self.state.status)
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Window title with the HUD appended
pub fn title_with_status(status: &str) -> String {
    let status = status.trim();
    if status.is_empty() {
        WINDOW_TITLE.to_string()
    } else {
        format!("{} {}", WINDOW_TITLE, status)
    }
}

impl Chrome for WindowChrome {
    fn replace_stylesheet(&mut self, css: &str) {
        self.state.replace_stylesheet(css);
        self.request_redraw();
    }

    fn set_border_color(&mut self, hex: &str) {
        self.state.set_border_color(hex);
        self.request_redraw();
    }

    fn set_status(&mut self, text: &str) {
        self.state.set_status(text);
        if let Some(window) = &self.window {
            window.set_title(&title_with_status(text));
        }
    }

    fn set_tabs(&mut self, titles: &[String], active: usize) {
        self.state.set_tabs(titles, active);
        self.request_redraw();
    }
}

/// Estimate the terminal grid that fits a window
///
/// Cells are approximated from the font size: 0.6em wide, 1.3em tall.
pub fn grid_size_for(size: PhysicalSize<u32>, scale_factor: f64, font: &FontDescriptor) -> Size {
    let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    let width = size.width as f64 / scale - 2.0 * CHROME_INSET;
    let height = size.height as f64 / scale - 2.0 * CHROME_INSET - CHROME_HEIGHT;

    let font_px = font.size.max(1) as f64 * 4.0 / 3.0;
    let cell_width = font_px * 0.6;
    let cell_height = font_px * 1.3;

    let columns = (width / cell_width).floor().max(2.0) as usize;
    let lines = (height / cell_height).floor().max(1.0) as usize;
    Size::new(columns, lines)
}
