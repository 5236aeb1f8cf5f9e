//! Desktop launcher integration
//!
//! Writes a freedesktop `.desktop` entry so the terminal shows up in
//! application launchers and groups under its own WM class.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Application id, also used as the WM class
pub const APP_ID: &str = "h3v3n-terminal-v12";

/// Render the desktop entry for the given executable
pub fn desktop_entry(exec: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Name=H3V3N Terminal\n\
         Comment=Transparent Terminal Emulator\n\
         Exec={}\n\
         Icon=utilities-terminal\n\
         Terminal=false\n\
         Type=Application\n\
         Categories=System;TerminalEmulator;\n\
         StartupWMClass={}\n",
        exec_field(exec),
        APP_ID
    )
}

/// Quote the executable path when it contains reserved characters
fn exec_field(exec: &Path) -> String {
    let raw = exec.to_string_lossy();
    let needs_quotes = raw
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '`' | '$'));
    if !needs_quotes {
        return raw.into_owned();
    }

    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// ~/.local/share/applications
pub fn applications_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".local").join("share").join("applications"))
}

/// Write the desktop entry into `dir`, creating it if needed
pub fn install_desktop_entry(dir: &Path, exec: &Path) -> Result<PathBuf, ConfigError> {
    fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDirError(dir.to_path_buf(), e))?;

    let path = dir.join(format!("{APP_ID}.desktop"));
    fs::write(&path, desktop_entry(exec)).map_err(|e| ConfigError::WriteError(path.clone(), e))?;
    Ok(path)
}

/// Install the entry for the running executable; failures are only logged
pub fn install_for_current_exe() {
    let Some(dir) = applications_dir() else {
        log::debug!("No home directory, skipping desktop entry");
        return;
    };

    let exec = match std::env::current_exe() {
        Ok(exec) => exec,
        Err(e) => {
            log::debug!("Could not resolve current executable: {}", e);
            return;
        }
    };

    match install_desktop_entry(&dir, &exec) {
        Ok(path) => log::debug!("Desktop entry written to {:?}", path),
        Err(e) => log::warn!("Desktop integration skipped: {}", e),
    }
}
