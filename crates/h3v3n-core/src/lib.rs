//! H3V3N Core - terminal surfaces
//!
//! This crate provides:
//! - Terminal grid state (via alacritty_terminal)
//! - PTY process management (via portable-pty)
//! - The `TerminalSurface` trait the application drives, and `ShellSurface`,
//!   its PTY-backed implementation

use std::sync::{Arc, Mutex};

use alacritty_terminal::event::{Event, EventListener};
use alacritty_terminal::grid::Dimensions;
use alacritty_terminal::index::Side;
use alacritty_terminal::selection::Selection;
use alacritty_terminal::term::{Config, Term, TermMode};
use alacritty_terminal::term::test::TermSize;
use alacritty_terminal::vte::ansi;

pub mod pty;
mod shell;
mod surface;

pub use alacritty_terminal::index::{Column, Line, Point};
pub use alacritty_terminal::selection::SelectionType;
pub use shell::{ShellSurface, ShellSurfaceFactory};
pub use surface::{ExitStatus, SurfaceColors, SurfaceError, SurfaceFactory, TerminalSurface};

/// Shared event storage
#[derive(Default)]
struct EventStorage {
    events: Vec<Event>,
}

/// Terminal event handler that collects events for the application
#[derive(Clone)]
pub struct TerminalEventProxy {
    storage: Arc<Mutex<EventStorage>>,
}

impl TerminalEventProxy {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(EventStorage::default())),
        }
    }

    /// Take all pending events
    pub fn take_events(&self) -> Vec<Event> {
        match self.storage.lock() {
            Ok(mut storage) => storage.events.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().events.drain(..).collect(),
        }
    }
}

impl Default for TerminalEventProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl EventListener for TerminalEventProxy {
    fn send_event(&self, event: Event) {
        match self.storage.lock() {
            Ok(mut storage) => storage.events.push(event),
            Err(poisoned) => poisoned.into_inner().events.push(event),
        }
    }
}

/// Terminal size in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub columns: usize,
    pub lines: usize,
}

impl Size {
    pub fn new(columns: usize, lines: usize) -> Self {
        Self { columns, lines }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Terminal grid wrapper around alacritty_terminal
pub struct Terminal {
    term: Term<TerminalEventProxy>,
    parser: ansi::Processor,
    event_proxy: TerminalEventProxy,
    size: Size,
}

impl Terminal {
    /// Create a new terminal with the given size
    pub fn new(size: Size) -> Self {
        let config = Config::default();
        let term_size = TermSize::new(size.columns, size.lines);
        let event_proxy = TerminalEventProxy::new();
        let term = Term::new(config, &term_size, event_proxy.clone());

        Self {
            term,
            parser: ansi::Processor::new(),
            event_proxy,
            size,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn columns(&self) -> usize {
        self.term.columns()
    }

    pub fn screen_lines(&self) -> usize {
        self.term.screen_lines()
    }

    /// Feed shell output through the escape-sequence parser
    ///
    /// The parser is kept between calls so sequences split across reads
    /// are still recognised.
    pub fn process_input(&mut self, bytes: &[u8]) {
        self.parser.advance(&mut self.term, bytes);
    }

    /// Take pending terminal events
    pub fn take_events(&self) -> Vec<Event> {
        self.event_proxy.take_events()
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        let term_size = TermSize::new(size.columns, size.lines);
        self.term.resize(term_size);
    }

    /// Text of one visible line, trailing blanks trimmed
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.screen_lines() {
            return String::new();
        }
        let row = &self.term.grid()[Line(line as i32)];
        let text: String = (0..self.columns()).map(|col| row[Column(col)].c).collect();
        text.trim_end().to_string()
    }

    /// All visible lines joined with newlines
    pub fn visible_text(&self) -> String {
        (0..self.screen_lines())
            .map(|line| self.line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn start_selection(&mut self, point: Point, ty: SelectionType) {
        self.term.selection = Some(Selection::new(ty, point, Side::Left));
    }

    pub fn update_selection(&mut self, point: Point) {
        if let Some(selection) = self.term.selection.as_mut() {
            selection.update(point, Side::Right);
        }
    }

    pub fn clear_selection(&mut self) {
        self.term.selection = None;
    }

    pub fn has_selection(&self) -> bool {
        self.term.selection.is_some()
    }

    pub fn selection_to_string(&self) -> Option<String> {
        self.term.selection_to_string()
    }

    pub fn bracketed_paste_enabled(&self) -> bool {
        self.term.mode().contains(TermMode::BRACKETED_PASTE)
    }

    pub fn application_cursor_enabled(&self) -> bool {
        self.term.mode().contains(TermMode::APP_CURSOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_terminal() {
        let term = Terminal::new(Size::new(80, 24));
        assert_eq!(term.columns(), 80);
        assert_eq!(term.screen_lines(), 24);
    }

    #[test]
    fn process_simple_text() {
        let mut term = Terminal::new(Size::new(80, 24));
        term.process_input(b"Hello, World!");
        assert_eq!(term.line_text(0), "Hello, World!");
    }

    #[test]
    fn split_escape_sequence_is_not_printed() {
        let mut term = Terminal::new(Size::new(40, 5));
        term.process_input(b"red:\x1b[3");
        term.process_input(b"1mtext\x1b[0m");
        assert_eq!(term.line_text(0), "red:text");
    }

    #[test]
    fn newline_moves_to_next_line() {
        let mut term = Terminal::new(Size::new(20, 4));
        term.process_input(b"one\r\ntwo");
        assert_eq!(term.visible_text().lines().take(2).collect::<Vec<_>>(), ["one", "two"]);
    }

    #[test]
    fn selection_round_trip() {
        let mut term = Terminal::new(Size::new(20, 4));
        term.process_input(b"copy me");
        assert!(!term.has_selection());

        term.start_selection(Point::new(Line(0), Column(0)), SelectionType::Simple);
        term.update_selection(Point::new(Line(0), Column(3)));
        assert!(term.has_selection());
        assert_eq!(term.selection_to_string().as_deref(), Some("copy"));

        term.clear_selection();
        assert!(term.selection_to_string().is_none());
    }

    #[test]
    fn resize_updates_dimensions() {
        let mut term = Terminal::new(Size::new(80, 24));
        term.resize(Size::new(100, 30));
        assert_eq!(term.columns(), 100);
        assert_eq!(term.screen_lines(), 30);
        assert_eq!(term.size(), Size::new(100, 30));
    }

    #[test]
    fn line_text_out_of_range_is_empty() {
        let term = Terminal::new(Size::new(10, 2));
        assert_eq!(term.line_text(5), "");
    }
}
