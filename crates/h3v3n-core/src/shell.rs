//! PTY-backed terminal surface
//!
//! Output from the shell is parsed into an alacritty grid; the clipboard is
//! reached through arboard.

use std::path::Path;

use alacritty_terminal::event::Event;
use h3v3n_theme::Color;

use crate::pty::Pty;
use crate::surface::{ExitStatus, SurfaceColors, SurfaceError, SurfaceFactory, TerminalSurface};
use crate::{Size, Terminal};

/// A terminal surface running a real shell
pub struct ShellSurface {
    terminal: Terminal,
    pty: Option<Pty>,
    colors: SurfaceColors,
    font: String,
    exit_reported: bool,
}

impl ShellSurface {
    pub fn new(size: Size) -> Self {
        Self {
            terminal: Terminal::new(size),
            pty: None,
            colors: SurfaceColors::default(),
            font: String::new(),
            exit_reported: false,
        }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    pub fn colors(&self) -> &SurfaceColors {
        &self.colors
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn is_running(&self) -> bool {
        self.pty.is_some() && !self.exit_reported
    }

    fn write(&self, bytes: &[u8]) {
        if let Some(pty) = &self.pty {
            pty.write(bytes);
        }
    }
}

impl TerminalSurface for ShellSurface {
    fn spawn_shell(&mut self, cwd: &Path, argv: &[String]) -> Result<(), SurfaceError> {
        let size = self.terminal.size();
        let pty = Pty::spawn(cwd, argv, size.columns as u16, size.lines as u16).map_err(|e| {
            SurfaceError::Spawn {
                program: argv.first().cloned().unwrap_or_default(),
                reason: format!("{:#}", e),
            }
        })?;
        log::info!("Spawned {:?} in {:?}", argv, cwd);
        self.pty = Some(pty);
        self.exit_reported = false;
        Ok(())
    }

    fn set_colors(&mut self, foreground: Color, background: Color, palette: &[Color]) {
        self.colors = SurfaceColors {
            foreground,
            background,
            palette: palette.to_vec(),
        };
    }

    fn set_font(&mut self, descriptor: &str) {
        if self.font != descriptor {
            self.font = descriptor.to_string();
        }
    }

    fn poll_exit(&mut self) -> Option<ExitStatus> {
        if self.exit_reported {
            return None;
        }
        let status = self.pty.as_mut()?.try_wait()?;
        log::info!("Shell exited with status {}", status.code);
        self.exit_reported = true;
        Some(status)
    }

    fn copy_selection(&mut self) -> Result<bool, SurfaceError> {
        let Some(text) = self.terminal.selection_to_string() else {
            return Ok(false);
        };
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| SurfaceError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| SurfaceError::Clipboard(e.to_string()))?;
        Ok(true)
    }

    fn paste_clipboard(&mut self) -> Result<(), SurfaceError> {
        if self.pty.is_none() {
            return Err(SurfaceError::NotRunning);
        }
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| SurfaceError::Clipboard(e.to_string()))?;
        let text = clipboard
            .get_text()
            .map_err(|e| SurfaceError::Clipboard(e.to_string()))?;
        if text.is_empty() {
            return Ok(());
        }

        if self.terminal.bracketed_paste_enabled() {
            self.write(b"\x1b[200~");
            self.write(text.as_bytes());
            self.write(b"\x1b[201~");
        } else {
            self.write(text.as_bytes());
        }
        self.terminal.clear_selection();
        Ok(())
    }

    fn send_raw_bytes(&mut self, bytes: &[u8]) {
        self.write(bytes);
    }

    fn show_error(&mut self, message: &str) {
        let text = format!("\x1b[1;31m{}\x1b[0m\r\n", message.replace('\n', "\r\n"));
        self.terminal.process_input(text.as_bytes());
    }

    fn pump(&mut self) -> bool {
        let Some(pty) = &self.pty else {
            return false;
        };
        let output = pty.read_available();
        if output.is_empty() {
            return false;
        }
        self.terminal.process_input(&output);

        // Answer terminal queries (device attributes, cursor position)
        for event in self.terminal.take_events() {
            if let Event::PtyWrite(reply) = event {
                pty.write(reply.as_bytes());
            }
        }
        true
    }

    fn application_cursor(&self) -> bool {
        self.terminal.application_cursor_enabled()
    }

    fn resize(&mut self, size: Size) {
        self.terminal.resize(size);
        if let Some(pty) = &self.pty {
            pty.resize(size.columns as u16, size.lines as u16);
        }
    }
}

/// Creates `ShellSurface`s of a fixed initial size
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSurfaceFactory {
    pub size: Size,
}

impl SurfaceFactory for ShellSurfaceFactory {
    type Surface = ShellSurface;

    fn create(&mut self) -> ShellSurface {
        ShellSurface::new(self.size)
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
