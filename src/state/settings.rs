//! Settings dialog model
//!
//! A modal, keyboard-driven form with four pages. The dialog keeps a local
//! mirror of the values it edits and turns every edit into a [`Command`];
//! applying and persisting the change is the dispatcher's job.

use std::fmt;

use h3v3n_config::{Config, MAX_ALPHA, MIN_ALPHA, get_bundled_theme, sorted_theme_names};
use h3v3n_theme::Color;

use crate::font::{GENERIC_MONOSPACE, monospace_families};
use crate::input::Command;

const ALPHA_STEP: f64 = 0.05;
const MIN_FONT_SIZE: u32 = 6;
const MAX_FONT_SIZE: u32 = 72;
const DEFAULT_FONT_SIZE: u32 = 12;

/// Styles the picker cycles through; the empty style is regular
const FONT_STYLES: [&str; 4] = ["", "Bold", "Italic", "Bold Italic"];

/// Words that end a family name in a descriptor
const STYLE_WORDS: &[&str] = &[
    "Thin", "Ultra-Light", "Light", "Semi-Light", "Book", "Regular", "Normal", "Medium",
    "Semi-Bold", "Bold", "Ultra-Bold", "Heavy", "Black", "Italic", "Oblique", "Condensed",
];

/// Navigation keys understood by overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    NextPage,
    PreviousPage,
    Up,
    Down,
    Left,
    Right,
    Activate,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPage {
    Themes,
    Look,
    Features,
    Info,
}

impl SettingsPage {
    pub const ALL: [SettingsPage; 4] = [
        SettingsPage::Themes,
        SettingsPage::Look,
        SettingsPage::Features,
        SettingsPage::Info,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SettingsPage::Themes => "Themes",
            SettingsPage::Look => "Look",
            SettingsPage::Features => "Features",
            SettingsPage::Info => "Info",
        }
    }

    fn index(self) -> usize {
        match self {
            SettingsPage::Themes => 0,
            SettingsPage::Look => 1,
            SettingsPage::Features => 2,
            SettingsPage::Info => 3,
        }
    }

    fn offset(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[(self.index() as isize + delta).rem_euclid(len) as usize]
    }
}

/// One editable row of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    /// Entry in the sorted theme list
    Theme(&'static str),
    Transparency,
    FontFamily,
    FontStyle,
    FontSize,
    TextColor,
    Clock,
    SystemMonitor,
}

impl SettingsRow {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsRow::Theme(name) => *name,
            SettingsRow::Transparency => "Global Transparency",
            SettingsRow::FontFamily => "Font",
            SettingsRow::FontStyle => "Font Style",
            SettingsRow::FontSize => "Font Size",
            SettingsRow::TextColor => "Text Color",
            SettingsRow::Clock => "Clock",
            SettingsRow::SystemMonitor => "System Monitor",
        }
    }
}

/// A font descriptor in "Family [Style...] Size" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    pub family: String,
    /// Style words after the family, e.g. "Bold Italic"; empty for regular
    pub style: String,
    pub size: u32,
}

impl FontDescriptor {
    /// Parse a descriptor; a missing or unreadable size falls back to 12
    pub fn parse(descriptor: &str) -> Self {
        let mut words: Vec<&str> = descriptor.split_whitespace().collect();

        let size = match words.last().map(|w| w.parse::<u32>()) {
            Some(Ok(size)) => {
                words.pop();
                size
            }
            _ => DEFAULT_FONT_SIZE,
        };

        let mut split = words.len();
        while split > 0 && is_style_word(words[split - 1]) {
            split -= 1;
        }
        // A descriptor made only of style words keeps the generic family
        let family = if split == 0 {
            GENERIC_MONOSPACE.to_string()
        } else {
            words[..split].join(" ")
        };

        Self {
            family,
            style: words[split..].join(" "),
            size,
        }
    }

    pub fn with_size(&self, size: u32) -> Self {
        Self {
            size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..self.clone()
        }
    }

    pub fn with_family(&self, family: &str) -> Self {
        Self {
            family: family.to_string(),
            ..self.clone()
        }
    }

    pub fn with_style(&self, style: &str) -> Self {
        Self {
            style: style.to_string(),
            ..self.clone()
        }
    }

    /// Style for display; regular when empty
    pub fn style_label(&self) -> &str {
        if self.style.is_empty() {
            "Regular"
        } else {
            &self.style
        }
    }
}

fn is_style_word(word: &str) -> bool {
    STYLE_WORDS.iter().any(|s| s.eq_ignore_ascii_case(word))
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.style.is_empty() {
            write!(f, "{} {}", self.family, self.size)
        } else {
            write!(f, "{} {} {}", self.family, self.style, self.size)
        }
    }
}

/// Step through `len` choices from `current`, wrapping at both ends
///
/// An unknown current value starts from the first (or, stepping back, the
/// last) choice.
fn cycle(current: Option<usize>, len: usize, delta: i32) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as i32;
    let next = match current {
        Some(i) => (i as i32 + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    Some(next as usize)
}

/// Step the transparency slider by `steps` increments of 0.05
pub fn step_alpha(alpha: f64, steps: i32) -> f64 {
    let stepped = ((alpha / ALPHA_STEP).round() + steps as f64) * ALPHA_STEP;
    // Snap to two decimals so repeated steps stay on the grid
    ((stepped * 100.0).round() / 100.0).clamp(MIN_ALPHA, MAX_ALPHA)
}

/// Text color choices: the distinct foregrounds of the bundled themes
fn text_swatches() -> Vec<Color> {
    let mut swatches: Vec<Color> = Vec::new();
    for name in sorted_theme_names() {
        let Some(theme) = get_bundled_theme(name) else {
            continue;
        };
        if let Ok((fg, _)) = theme.colors() {
            if !swatches.iter().any(|c| c.to_hex() == fg.to_hex()) {
                swatches.push(fg);
            }
        }
    }
    swatches
}

/// Text shown on the Info page
pub fn info_text() -> String {
    format!(
        "H3V3N TERMINAL\n\nVersion {}\nSystem: {}\nArchitecture: {}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// The settings dialog
#[derive(Debug, Clone)]
pub struct SettingsDialog {
    pub visible: bool,
    page: SettingsPage,
    selected: usize,
    themes: Vec<&'static str>,
    swatches: Vec<Color>,
    /// Font families for the picker, scanned when the dialog first opens
    families: Vec<String>,
    alpha: f64,
    font: FontDescriptor,
    text_color: Color,
    show_clock: bool,
    show_sys: bool,
}

impl Default for SettingsDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsDialog {
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            visible: false,
            page: SettingsPage::Themes,
            selected: 0,
            themes: sorted_theme_names(),
            swatches: text_swatches(),
            families: Vec::new(),
            alpha: config.alpha,
            font: FontDescriptor::parse(&config.font),
            text_color: config.text_color.to_color(1.0),
            show_clock: config.show_clock,
            show_sys: config.show_sys,
        }
    }

    /// Dialog with a fixed font family list
    pub fn with_families(families: Vec<String>) -> Self {
        Self {
            families,
            ..Self::new()
        }
    }

    /// Show the dialog on its first page, mirroring current settings
    pub fn open(&mut self, config: &Config, text_color: Color) {
        if self.families.is_empty() {
            self.families = monospace_families().to_vec();
        }
        self.sync(config, text_color);
        self.visible = true;
        self.page = SettingsPage::Themes;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Refresh the mirrored values after a change was applied
    pub fn sync(&mut self, config: &Config, text_color: Color) {
        self.alpha = config.alpha;
        self.font = FontDescriptor::parse(&config.font);
        self.text_color = text_color;
        self.show_clock = config.show_clock;
        self.show_sys = config.show_sys;
    }

    pub fn page(&self) -> SettingsPage {
        self.page
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn rows(&self) -> Vec<SettingsRow> {
        match self.page {
            SettingsPage::Themes => self.themes.iter().copied().map(SettingsRow::Theme).collect(),
            SettingsPage::Look => vec![
                SettingsRow::Transparency,
                SettingsRow::FontFamily,
                SettingsRow::FontStyle,
                SettingsRow::FontSize,
                SettingsRow::TextColor,
            ],
            SettingsPage::Features => vec![SettingsRow::Clock, SettingsRow::SystemMonitor],
            SettingsPage::Info => Vec::new(),
        }
    }

    pub fn selected_row(&self) -> Option<SettingsRow> {
        self.rows().get(self.selected).copied()
    }

    /// Current value of a row, formatted for display
    pub fn row_value(&self, row: SettingsRow) -> String {
        let on_off = |b: bool| (if b { "On" } else { "Off" }).to_string();
        match row {
            SettingsRow::Theme(_) => String::new(),
            SettingsRow::Transparency => format!("{:.2}", self.alpha),
            SettingsRow::FontFamily => self.font.family.clone(),
            SettingsRow::FontStyle => self.font.style_label().to_string(),
            SettingsRow::FontSize => self.font.size.to_string(),
            SettingsRow::TextColor => self.text_color.to_hex(),
            SettingsRow::Clock => on_off(self.show_clock),
            SettingsRow::SystemMonitor => on_off(self.show_sys),
        }
    }

    pub fn info_text(&self) -> String {
        info_text()
    }

    /// Handle a navigation key, returning the command the edit produces
    pub fn handle_key(&mut self, key: DialogKey) -> Option<Command> {
        match key {
            DialogKey::NextPage => self.switch_page(1),
            DialogKey::PreviousPage => self.switch_page(-1),
            DialogKey::Up => self.selected = self.selected.saturating_sub(1),
            DialogKey::Down => {
                let len = self.rows().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            DialogKey::Left => return self.adjust(-1),
            DialogKey::Right => return self.adjust(1),
            DialogKey::Activate => return self.activate(),
            DialogKey::Close => return Some(Command::CloseSettings),
        }
        None
    }

    fn switch_page(&mut self, delta: isize) {
        self.page = self.page.offset(delta);
        self.selected = 0;
    }

    fn adjust(&mut self, delta: i32) -> Option<Command> {
        match self.selected_row()? {
            SettingsRow::Transparency => {
                self.alpha = step_alpha(self.alpha, delta);
                Some(Command::SetAlpha(self.alpha))
            }
            SettingsRow::FontFamily => {
                let current = self
                    .families
                    .iter()
                    .position(|f| f.eq_ignore_ascii_case(&self.font.family));
                let next = cycle(current, self.families.len(), delta)?;
                self.font = self.font.with_family(&self.families[next]);
                Some(Command::SetFont(self.font.to_string()))
            }
            SettingsRow::FontStyle => {
                let current = FONT_STYLES
                    .iter()
                    .position(|s| s.eq_ignore_ascii_case(&self.font.style));
                let next = cycle(current, FONT_STYLES.len(), delta)?;
                self.font = self.font.with_style(FONT_STYLES[next]);
                Some(Command::SetFont(self.font.to_string()))
            }
            SettingsRow::FontSize => {
                let size = self.font.size.saturating_add_signed(delta);
                self.font = self.font.with_size(size);
                Some(Command::SetFont(self.font.to_string()))
            }
            SettingsRow::TextColor => {
                let current = self
                    .swatches
                    .iter()
                    .position(|c| c.to_hex() == self.text_color.to_hex());
                let next = cycle(current, self.swatches.len(), delta)?;
                self.text_color = self.swatches[next];
                Some(Command::SetTextColor(self.text_color))
            }
            SettingsRow::Clock | SettingsRow::SystemMonitor => self.activate(),
            SettingsRow::Theme(_) => None,
        }
    }

    fn activate(&mut self) -> Option<Command> {
        match self.selected_row()? {
            SettingsRow::Theme(name) => Some(Command::SetTheme(name.to_string())),
            SettingsRow::Clock => {
                self.show_clock = !self.show_clock;
                Some(Command::SetShowClock(self.show_clock))
            }
            SettingsRow::SystemMonitor => {
                self.show_sys = !self.show_sys;
                Some(Command::SetShowSystem(self.show_sys))
            }
            _ => None,
        }
    }
}
