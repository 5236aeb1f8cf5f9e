//! Manager modules for application lifecycle
//!
//! This module contains manager types that coordinate higher-level
//! application concerns: persisted settings and the tab/surface lifecycle.

mod config_manager;
mod tab_manager;

pub use config_manager::ConfigManager;
pub use tab_manager::{CloseOutcome, ShellCommand, TabManager};
