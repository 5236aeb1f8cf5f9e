//! Application context
//!
//! `App` owns every piece of runtime state and is the only place state
//! changes. Input handlers, the settings dialog and the context menu produce
//! [`Command`]s; [`App::dispatch`] applies them, restyles the surfaces and
//! chrome when appearance changed, and persists settings after each change.

use std::time::Instant;

use h3v3n_config::{Config, ConfigStore, Keybindings};
use h3v3n_core::{SurfaceFactory, TerminalSurface};
use h3v3n_theme::ChromeStyle;
use winit::dpi::PhysicalSize;
use winit::keyboard::Key;

use crate::animation::AnimationDriver;
use crate::chrome::Chrome;
use crate::hud::{MetricsProvider, StatusBar, compose_hud, local_clock};
use crate::input::{Command, KeyFocus, KeyboardResult, ModifierState, handle_keyboard_input};
use crate::managers::{CloseOutcome, ConfigManager, ShellCommand, TabManager};
use crate::state::{ContextMenuState, FontDescriptor, LiveColors, SettingsDialog};
use crate::window::grid_size_for;

/// Form feed; shells redraw on it
const CLEAR_SCREEN: u8 = 0x0c;

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    Quit,
}

pub struct App<F, C, M>
where
    F: SurfaceFactory,
    C: Chrome,
    M: MetricsProvider,
{
    config: ConfigManager,
    factory: F,
    tabs: TabManager<F::Surface>,
    chrome: C,
    metrics: M,
    shell: ShellCommand,
    keybindings: Keybindings,
    animation: AnimationDriver,
    status: StatusBar,
    settings: SettingsDialog,
    context_menu: ContextMenuState,
    /// Window inner size and scale factor, once a window exists
    viewport: Option<(PhysicalSize<u32>, f64)>,
}

impl<F, C, M> App<F, C, M>
where
    F: SurfaceFactory,
    C: Chrome,
    M: MetricsProvider,
{
    /// Load settings, style the chrome and open the first tab
    pub fn new(
        store: ConfigStore,
        factory: F,
        chrome: C,
        metrics: M,
        shell: ShellCommand,
        now: Instant,
    ) -> Self {
        let mut app = Self {
            config: ConfigManager::load(store),
            factory,
            tabs: TabManager::new(),
            chrome,
            metrics,
            shell,
            keybindings: Keybindings::new(),
            animation: AnimationDriver::new(now),
            status: StatusBar::new(),
            settings: SettingsDialog::new(),
            context_menu: ContextMenuState::new(),
            viewport: None,
        };
        app.open_tab();
        app.refresh_hud();
        app
    }

    // === Accessors ===

    pub fn config(&self) -> &Config {
        self.config.config()
    }

    pub fn colors(&self) -> &LiveColors {
        self.config.colors()
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config
    }

    pub fn tabs(&self) -> &TabManager<F::Surface> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager<F::Surface> {
        &mut self.tabs
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn settings(&self) -> &SettingsDialog {
        &self.settings
    }

    pub fn context_menu(&self) -> &ContextMenuState {
        &self.context_menu
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.current()
    }

    /// When the event loop should wake for the next timer
    pub fn next_deadline(&self) -> Instant {
        self.animation.next_deadline()
    }

    // === Styling ===

    /// Push colors and font to every surface, then replace the chrome
    /// stylesheet
    pub fn apply_styles(&mut self) {
        let config = self.config.config();
        let alpha = config.alpha;
        let font = config.font.clone();
        let foreground = self.config.colors().foreground;
        let background = self.config.colors().background.with_alpha(alpha);

        for surface in self.tabs.surfaces_mut() {
            surface.set_colors(foreground, background, &[]);
            surface.set_font(&font);
        }

        let style = ChromeStyle::new(foreground, background, alpha);
        self.chrome.replace_stylesheet(&style.stylesheet());
    }

    /// Record the window size and fit every grid to it
    pub fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        self.viewport = Some((size, scale_factor));
        self.layout_grid();
    }

    /// Recompute the grid from the viewport and the configured font
    fn layout_grid(&mut self) {
        let Some((size, scale_factor)) = self.viewport else {
            return;
        };
        let font = FontDescriptor::parse(&self.config.config().font);
        let grid = grid_size_for(size, scale_factor, &font);
        log::debug!("Grid {}x{}", grid.columns, grid.lines);

        for surface in self.tabs.surfaces_mut() {
            surface.resize(grid);
        }
        self.factory.set_size(grid);
    }

    fn sync_tab_strip(&mut self) {
        let titles = self.tabs.titles();
        self.chrome.set_tabs(&titles, self.tabs.active_index());
    }

    fn open_tab(&mut self) {
        self.tabs.open_tab(&mut self.factory, &self.shell);
        self.apply_styles();
        self.sync_tab_strip();
    }

    fn close_active_tab(&mut self) -> DispatchOutcome {
        match self.tabs.close_active_tab() {
            CloseOutcome::Closed(_) => {
                self.sync_tab_strip();
                DispatchOutcome::Continue
            }
            CloseOutcome::Quit => {
                log::info!("Last tab closed, exiting");
                DispatchOutcome::Quit
            }
        }
    }

    // === Commands ===

    /// Apply a command
    pub fn dispatch(&mut self, command: Command) -> DispatchOutcome {
        log::debug!("dispatch {:?}", command);

        if command.changes_settings() {
            if self.config.apply(&command) {
                if command.changes_appearance() {
                    self.apply_styles();
                }
                if matches!(command, Command::SetFont(_)) {
                    self.layout_grid();
                }
                self.config.save();
                if self.settings.visible {
                    self.settings
                        .sync(self.config.config(), self.config.colors().foreground);
                }
            }
            return DispatchOutcome::Continue;
        }

        match command {
            Command::NewTab => self.open_tab(),
            Command::CloseCurrentTab => return self.close_active_tab(),
            Command::NextTab => {
                self.tabs.select_next();
                self.sync_tab_strip();
            }
            Command::PreviousTab => {
                self.tabs.select_previous();
                self.sync_tab_strip();
            }
            Command::SwitchTab(id) => {
                if self.tabs.select(id) {
                    self.sync_tab_strip();
                }
            }
            Command::Copy => {
                if let Some(surface) = self.tabs.active_surface_mut() {
                    match surface.copy_selection() {
                        Ok(true) => {}
                        Ok(false) => log::debug!("Nothing selected to copy"),
                        Err(e) => log::warn!("{}", e),
                    }
                }
            }
            Command::Paste => {
                if let Some(surface) = self.tabs.active_surface_mut() {
                    if let Err(e) = surface.paste_clipboard() {
                        log::warn!("{}", e);
                    }
                }
            }
            Command::ClearTerminal => self.send_to_active(&[CLEAR_SCREEN]),
            Command::SendToPty(bytes) => self.send_to_active(&bytes),
            Command::OpenSettings => {
                self.context_menu.hide();
                self.settings
                    .open(self.config.config(), self.config.colors().foreground);
            }
            Command::CloseSettings => self.settings.close(),
            Command::OpenContextMenu { x, y } => self.context_menu.show(x, y),
            Command::CloseContextMenu => self.context_menu.hide(),
            // Settings commands were handled above
            _ => {}
        }
        DispatchOutcome::Continue
    }

    fn send_to_active(&mut self, bytes: &[u8]) {
        if let Some(surface) = self.tabs.active_surface_mut() {
            surface.send_raw_bytes(bytes);
        }
    }

    // === Input ===

    fn key_focus(&self) -> KeyFocus {
        if self.settings.visible {
            KeyFocus::Settings
        } else if self.context_menu.visible {
            KeyFocus::ContextMenu
        } else {
            KeyFocus::Terminal
        }
    }

    /// Route a key press to a shortcut, an overlay or the active shell
    pub fn handle_key(&mut self, key: &Key, mods: ModifierState) -> DispatchOutcome {
        let focus = self.key_focus();
        let application_cursor = self
            .tabs
            .active_surface_mut()
            .is_some_and(|s| s.application_cursor());

        match handle_keyboard_input(key, mods, &self.keybindings, focus, application_cursor) {
            KeyboardResult::Shortcut(command) => self.dispatch(command),
            KeyboardResult::TerminalInput(bytes) => self.dispatch(Command::SendToPty(bytes)),
            KeyboardResult::Overlay(nav) => {
                let command = match focus {
                    KeyFocus::Settings => self.settings.handle_key(nav),
                    KeyFocus::ContextMenu => self.context_menu.handle_key(nav),
                    KeyFocus::Terminal => None,
                };
                match command {
                    Some(command) => self.dispatch(command),
                    None => DispatchOutcome::Continue,
                }
            }
            KeyboardResult::Handled | KeyboardResult::Ignored => DispatchOutcome::Continue,
        }
    }

    /// Secondary button over the terminal area
    pub fn secondary_click(&mut self, x: f32, y: f32) -> DispatchOutcome {
        if self.settings.visible {
            return DispatchOutcome::Continue;
        }
        self.dispatch(Command::OpenContextMenu { x, y })
    }

    /// Primary button runs the context menu item under the pointer, or
    /// dismisses the menu when clicked outside it
    pub fn primary_click(&mut self, x: f32, y: f32) -> DispatchOutcome {
        if !self.context_menu.visible {
            return DispatchOutcome::Continue;
        }
        match self.context_menu.click(x, y) {
            Some(command) => self.dispatch(command),
            None => DispatchOutcome::Continue,
        }
    }

    // === Timers and surfaces ===

    /// Run whichever timers are due at `now`
    pub fn tick(&mut self, now: Instant) {
        let (border, hud_due) = self.animation.poll(now, self.config.config().rgb_speed);
        if let Some(hex) = border {
            self.chrome.set_border_color(&hex);
        }
        if hud_due {
            self.refresh_hud();
        }
    }

    /// Rebuild the HUD line and replace the status text
    pub fn refresh_hud(&mut self) {
        let config = self.config.config();
        let clock = config.show_clock.then(local_clock);
        let text = compose_hud(clock.as_deref(), config.show_sys, &mut self.metrics);
        self.status.replace(text);
        if let Some(current) = self.status.current() {
            self.chrome.set_status(current);
        }
    }

    /// Pump shell output and handle shells that exited
    ///
    /// Each exit closes the active tab, whichever tab's shell ended.
    pub fn poll_surfaces(&mut self) -> DispatchOutcome {
        self.tabs.pump_all();
        for (id, status) in self.tabs.poll_exits() {
            log::info!("Shell in tab {} exited with status {}", id, status.code);
            if self.close_active_tab() == DispatchOutcome::Quit {
                return DispatchOutcome::Quit;
            }
        }
        DispatchOutcome::Continue
    }
}
