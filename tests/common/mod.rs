//! Common test utilities and harness
//!
//! Provides reusable utilities for functional testing including:
//! - Test environment setup (isolated config directory)
//! - A recording terminal surface and its factory
//! - Fixed system metrics

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Instant;

use h3v3n::app::App;
use h3v3n::chrome::ChromeState;
use h3v3n::hud::MetricsProvider;
use h3v3n::managers::ShellCommand;
use h3v3n_config::ConfigStore;
use h3v3n_core::{
    ExitStatus, Size, SurfaceColors, SurfaceError, SurfaceFactory, TerminalSurface,
};
use h3v3n_theme::Color;
use tempfile::TempDir;

pub type TestApp = App<MockFactory, ChromeState, FixedMetrics>;

/// Test environment with isolated config directory
pub struct TestEnvironment {
    /// Temporary directory for test config
    pub temp_dir: TempDir,
    /// Path to the config directory
    pub config_dir: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_dir = temp_dir.path().join("h3v3n-terminal");
        Self {
            temp_dir,
            config_dir,
        }
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::in_dir(&self.config_dir)
    }

    pub fn config_path(&self) -> PathBuf {
        self.store().path().to_path_buf()
    }

    /// Write a raw config file
    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(&self.config_dir).expect("Failed to create config dir");
        std::fs::write(self.config_path(), content).expect("Failed to write test config");
    }

    /// Read the raw config file
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("Failed to read test config")
    }

    /// Start an application against this environment
    pub fn start(&self) -> TestApp {
        self.start_with(MockFactory::default())
    }

    pub fn start_with(&self, factory: MockFactory) -> TestApp {
        App::new(
            self.store(),
            factory,
            ChromeState::new(),
            FixedMetrics::new(12.5, 40.0),
            ShellCommand::new("/home/tester", vec!["/bin/zsh".to_string()]),
            Instant::now(),
        )
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal surface that records every call
#[derive(Debug, Default)]
pub struct MockSurface {
    pub fail_spawn: bool,
    pub spawned: Vec<(PathBuf, Vec<String>)>,
    pub colors: Option<SurfaceColors>,
    pub font: Option<String>,
    /// Number of set_colors calls
    pub styled: usize,
    pub sent: Vec<Vec<u8>>,
    pub errors: Vec<String>,
    pub copies: usize,
    pub pastes: usize,
    pub exit: Option<ExitStatus>,
    pub application_cursor: bool,
    /// Last grid size pushed by the app
    pub size: Option<Size>,
}

impl TerminalSurface for MockSurface {
    fn spawn_shell(&mut self, cwd: &Path, argv: &[String]) -> Result<(), SurfaceError> {
        if self.fail_spawn {
            return Err(SurfaceError::Spawn {
                program: argv.first().cloned().unwrap_or_default(),
                reason: "No such file or directory".to_string(),
            });
        }
        self.spawned.push((cwd.to_path_buf(), argv.to_vec()));
        Ok(())
    }

    fn set_colors(&mut self, foreground: Color, background: Color, palette: &[Color]) {
        self.styled += 1;
        self.colors = Some(SurfaceColors {
            foreground,
            background,
            palette: palette.to_vec(),
        });
    }

    fn set_font(&mut self, descriptor: &str) {
        self.font = Some(descriptor.to_string());
    }

    fn poll_exit(&mut self) -> Option<ExitStatus> {
        self.exit.take()
    }

    fn copy_selection(&mut self) -> Result<bool, SurfaceError> {
        self.copies += 1;
        Ok(true)
    }

    fn paste_clipboard(&mut self) -> Result<(), SurfaceError> {
        self.pastes += 1;
        Ok(())
    }

    fn send_raw_bytes(&mut self, bytes: &[u8]) {
        self.sent.push(bytes.to_vec());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn application_cursor(&self) -> bool {
        self.application_cursor
    }

    fn resize(&mut self, size: Size) {
        self.size = Some(size);
    }
}

/// Factory producing [`MockSurface`]s
#[derive(Debug, Default)]
pub struct MockFactory {
    pub fail_spawn: bool,
    pub created: usize,
    pub size: Option<Size>,
}

impl MockFactory {
    pub fn failing() -> Self {
        Self {
            fail_spawn: true,
            ..Self::default()
        }
    }
}

impl SurfaceFactory for MockFactory {
    type Surface = MockSurface;

    fn create(&mut self) -> MockSurface {
        self.created += 1;
        MockSurface {
            fail_spawn: self.fail_spawn,
            size: self.size,
            ..MockSurface::default()
        }
    }

    fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }
}

/// Metrics with constant values
#[derive(Debug, Clone)]
pub struct FixedMetrics {
    pub cpu: f32,
    pub memory: f32,
    pub samples: usize,
}

impl FixedMetrics {
    pub fn new(cpu: f32, memory: f32) -> Self {
        Self {
            cpu,
            memory,
            samples: 0,
        }
    }
}

impl MetricsProvider for FixedMetrics {
    fn cpu_percent(&mut self) -> f32 {
        self.samples += 1;
        self.cpu
    }

    fn memory_percent(&mut self) -> f32 {
        self.memory
    }
}

/// The active tab's surface
pub fn active_surface(app: &mut TestApp) -> &mut MockSurface {
    app.tabs_mut()
        .active_surface_mut()
        .expect("there should be an active tab")
}
