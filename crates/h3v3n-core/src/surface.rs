//! The terminal surface seam
//!
//! A surface is one embedded terminal: a shell process, its grid, and the
//! colors and font it is drawn with. The application only ever talks to
//! surfaces through this trait so tab management can be exercised without
//! spawning real shells.

use std::path::Path;

use h3v3n_theme::Color;
use thiserror::Error;

use crate::Size;

/// Exit status of a surface's shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    pub code: u32,
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Colors currently applied to a surface
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceColors {
    pub foreground: Color,
    pub background: Color,
    /// Custom 16-color palette; empty means the built-in one
    pub palette: Vec<Color>,
}

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("No shell is running")]
    NotRunning,
}

/// One embedded terminal
pub trait TerminalSurface {
    /// Start the shell; returns immediately
    fn spawn_shell(&mut self, cwd: &Path, argv: &[String]) -> Result<(), SurfaceError>;

    fn set_colors(&mut self, foreground: Color, background: Color, palette: &[Color]);

    fn set_font(&mut self, descriptor: &str);

    /// Exit notification, reported once after the shell terminates
    fn poll_exit(&mut self) -> Option<ExitStatus>;

    /// Copy the current selection; `Ok(false)` when nothing is selected
    fn copy_selection(&mut self) -> Result<bool, SurfaceError>;

    fn paste_clipboard(&mut self) -> Result<(), SurfaceError>;

    /// Write bytes straight to the shell
    fn send_raw_bytes(&mut self, bytes: &[u8]);

    /// Display an error inside the surface instead of shell output
    fn show_error(&mut self, message: &str);

    /// Drain pending shell output; returns true if the grid changed
    fn pump(&mut self) -> bool {
        false
    }

    /// Whether cursor keys should use application mode (DECCKM)
    fn application_cursor(&self) -> bool {
        false
    }

    /// Resize the grid and the shell's PTY
    fn resize(&mut self, _size: Size) {}
}

/// Creates surfaces for new tabs
pub trait SurfaceFactory {
    type Surface: TerminalSurface;

    fn create(&mut self) -> Self::Surface;

    /// Grid size for surfaces created from now on
    fn set_size(&mut self, _size: Size) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_success() {
        assert!(ExitStatus { code: 0 }.success());
        assert!(!ExitStatus { code: 127 }.success());
    }

    #[test]
    fn spawn_error_message() {
        let err = SurfaceError::Spawn {
            program: "/bin/nope".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to spawn /bin/nope: No such file or directory"
        );
    }

    #[test]
    fn default_colors_have_empty_palette() {
        let colors = SurfaceColors::default();
        assert!(colors.palette.is_empty());
    }
}
