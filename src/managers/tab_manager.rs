//! Tab lifecycle
//!
//! Pairs the pure [`TabState`] bookkeeping with one terminal surface per tab.
//! Surfaces are kept in tab order so styling walks them the way the tab strip
//! shows them.

use std::path::PathBuf;

use h3v3n_core::{ExitStatus, SurfaceFactory, TerminalSurface};

use crate::state::{TabId, TabInfo, TabState};

const FALLBACK_SHELL: &str = "/bin/bash";

/// Working directory and command line for new tabs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub cwd: PathBuf,
    pub argv: Vec<String>,
}

impl ShellCommand {
    pub fn new(cwd: impl Into<PathBuf>, argv: Vec<String>) -> Self {
        Self {
            cwd: cwd.into(),
            argv,
        }
    }

    /// The user's login shell started in their home directory
    pub fn from_env() -> Self {
        Self::from_parts(std::env::var("SHELL").ok(), dirs::home_dir())
    }

    fn from_parts(shell: Option<String>, home: Option<PathBuf>) -> Self {
        let shell = shell
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_SHELL.to_string());
        let cwd = home.unwrap_or_else(|| PathBuf::from("/"));
        Self::new(cwd, vec![shell])
    }
}

/// Result of closing the active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed and others remain
    Closed(TabId),
    /// The last tab is gone; the application should exit
    Quit,
}

/// Owns the tabs and their surfaces
pub struct TabManager<S: TerminalSurface> {
    state: TabState,
    surfaces: Vec<(TabId, S)>,
}

impl<S: TerminalSurface> Default for TabManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TerminalSurface> TabManager<S> {
    pub fn new() -> Self {
        Self {
            state: TabState::new(),
            surfaces: Vec::new(),
        }
    }

    /// Create a tab running `shell` and make it active
    ///
    /// A shell that fails to start still gets its tab; the error is shown
    /// inside it.
    pub fn open_tab<F>(&mut self, factory: &mut F, shell: &ShellCommand) -> TabId
    where
        F: SurfaceFactory<Surface = S>,
    {
        let mut surface = factory.create();
        if let Err(e) = surface.spawn_shell(&shell.cwd, &shell.argv) {
            log::error!("{}", e);
            surface.show_error(&e.to_string());
        }

        let id = self.state.add_tab_and_activate(self.state.next_title());
        self.surfaces.push((id, surface));
        log::info!("Opened tab {} ({} open)", id, self.state.len());
        id
    }

    /// Close the active tab
    ///
    /// Closing the only tab removes it and reports `Quit`. Dropping a surface
    /// terminates its shell.
    pub fn close_active_tab(&mut self) -> CloseOutcome {
        let Some(tab) = self.state.close_active() else {
            return CloseOutcome::Quit;
        };
        self.surfaces.retain(|(id, _)| *id != tab.id);
        log::info!("Closed tab {} ({} open)", tab.id, self.state.len());

        if self.state.is_empty() {
            CloseOutcome::Quit
        } else {
            CloseOutcome::Closed(tab.id)
        }
    }

    /// Drain exit notifications from every surface
    pub fn poll_exits(&mut self) -> Vec<(TabId, ExitStatus)> {
        self.surfaces
            .iter_mut()
            .filter_map(|(id, surface)| surface.poll_exit().map(|status| (*id, status)))
            .collect()
    }

    /// Pump shell output into every surface; true if any grid changed
    pub fn pump_all(&mut self) -> bool {
        let mut changed = false;
        for (_, surface) in &mut self.surfaces {
            changed |= surface.pump();
        }
        changed
    }

    pub fn select_next(&mut self) {
        self.state.next_tab();
    }

    pub fn select_previous(&mut self) {
        self.state.previous_tab();
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        self.state.switch_to_index(index)
    }

    pub fn select(&mut self, id: TabId) -> bool {
        self.state.switch_to(id)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.state.active_id()
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index()
    }

    pub fn active_surface_mut(&mut self) -> Option<&mut S> {
        let active = self.state.active_id()?;
        self.surface_mut(active)
    }

    pub fn surface(&self, id: TabId) -> Option<&S> {
        self.surfaces
            .iter()
            .find(|(tab, _)| *tab == id)
            .map(|(_, surface)| surface)
    }

    pub fn surface_mut(&mut self, id: TabId) -> Option<&mut S> {
        self.surfaces
            .iter_mut()
            .find(|(tab, _)| *tab == id)
            .map(|(_, surface)| surface)
    }

    /// Every surface, in tab order
    pub fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.surfaces.iter_mut().map(|(_, surface)| surface)
    }

    pub fn tabs(&self) -> &[TabInfo] {
        self.state.tabs()
    }

    pub fn titles(&self) -> Vec<String> {
        self.state.tabs().iter().map(|t| t.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h3v3n_core::SurfaceError;
    use h3v3n_theme::Color;
    use std::path::Path;

    #[derive(Default)]
    struct Stub {
        fail_spawn: bool,
        errors: Vec<String>,
        exit: Option<ExitStatus>,
    }

    impl TerminalSurface for Stub {
        fn spawn_shell(&mut self, _cwd: &Path, argv: &[String]) -> Result<(), SurfaceError> {
            if self.fail_spawn {
                return Err(SurfaceError::Spawn {
                    program: argv[0].clone(),
                    reason: "not found".into(),
                });
            }
            Ok(())
        }
        fn set_colors(&mut self, _: Color, _: Color, _: &[Color]) {}
        fn set_font(&mut self, _: &str) {}
        fn poll_exit(&mut self) -> Option<ExitStatus> {
            self.exit.take()
        }
        fn copy_selection(&mut self) -> Result<bool, SurfaceError> {
            Ok(false)
        }
        fn paste_clipboard(&mut self) -> Result<(), SurfaceError> {
            Ok(())
        }
        fn send_raw_bytes(&mut self, _: &[u8]) {}
        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    struct StubFactory {
        fail_spawn: bool,
    }

    impl SurfaceFactory for StubFactory {
        type Surface = Stub;
        fn create(&mut self) -> Stub {
            Stub {
                fail_spawn: self.fail_spawn,
                ..Stub::default()
            }
        }
    }

    fn shell() -> ShellCommand {
        ShellCommand::new("/", vec!["/bin/sh".into()])
    }

    fn manager_with(n: usize) -> (TabManager<Stub>, StubFactory) {
        let mut factory = StubFactory { fail_spawn: false };
        let mut tabs = TabManager::new();
        for _ in 0..n {
            tabs.open_tab(&mut factory, &shell());
        }
        (tabs, factory)
    }

    #[test]
    fn test_shell_command_fallbacks() {
        let cmd = ShellCommand::from_parts(None, None);
        assert_eq!(cmd.argv, vec!["/bin/bash".to_string()]);
        assert_eq!(cmd.cwd, PathBuf::from("/"));

        let cmd = ShellCommand::from_parts(Some("/usr/bin/zsh".into()), Some("/home/u".into()));
        assert_eq!(cmd.argv, vec!["/usr/bin/zsh".to_string()]);
        assert_eq!(cmd.cwd, PathBuf::from("/home/u"));

        let cmd = ShellCommand::from_parts(Some("  ".into()), None);
        assert_eq!(cmd.argv, vec!["/bin/bash".to_string()]);
    }

    #[test]
    fn test_open_first_tab() {
        let (tabs, _) = manager_with(1);
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs.titles(), vec!["Tab 1".to_string()]);
        assert_eq!(tabs.active_index(), 0);
    }

    #[test]
    fn test_new_tab_becomes_active() {
        let (tabs, _) = manager_with(3);
        assert_eq!(tabs.active_index(), 2);
        assert_eq!(tabs.titles(), vec!["Tab 1", "Tab 2", "Tab 3"]);
    }

    #[test]
    fn test_spawn_failure_keeps_tab() {
        let mut factory = StubFactory { fail_spawn: true };
        let mut tabs = TabManager::new();
        let id = tabs.open_tab(&mut factory, &shell());

        assert_eq!(tabs.len(), 1);
        let errors = &tabs.surface(id).unwrap().errors;
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("/bin/sh"));
    }

    #[test]
    fn test_close_with_one_tab_quits() {
        let (mut tabs, _) = manager_with(1);
        assert_eq!(tabs.close_active_tab(), CloseOutcome::Quit);
        assert!(tabs.is_empty());
        assert!(tabs.active_surface_mut().is_none());
    }

    #[test]
    fn test_close_with_many_tabs() {
        let (mut tabs, _) = manager_with(3);
        let active = tabs.active_id().unwrap();
        assert_eq!(tabs.close_active_tab(), CloseOutcome::Closed(active));
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.surfaces_mut().count(), 2);
        assert!(tabs.surface(active).is_none());
    }

    #[test]
    fn test_close_with_no_tabs_quits() {
        let mut tabs: TabManager<Stub> = TabManager::new();
        assert_eq!(tabs.close_active_tab(), CloseOutcome::Quit);
    }

    #[test]
    fn test_poll_exits_reports_each_once() {
        let (mut tabs, _) = manager_with(2);
        let first = tabs.tabs()[0].id;
        tabs.surface_mut(first).unwrap().exit = Some(ExitStatus { code: 0 });

        assert_eq!(tabs.poll_exits(), vec![(first, ExitStatus { code: 0 })]);
        assert!(tabs.poll_exits().is_empty());
    }

    #[test]
    fn test_navigation() {
        let (mut tabs, _) = manager_with(3);
        tabs.select_next();
        assert_eq!(tabs.active_index(), 0);
        tabs.select_previous();
        assert_eq!(tabs.active_index(), 2);
        assert!(tabs.select_index(1));
        assert!(!tabs.select_index(7));
        assert_eq!(tabs.active_index(), 1);
    }
}
