//! Status bar HUD
//!
//! Once a second the HUD line is rebuilt from the wall clock and system
//! metrics and replaces whatever the status bar showed before.

use sysinfo::System;

/// Source of system utilization figures
pub trait MetricsProvider {
    fn cpu_percent(&mut self) -> f32;
    fn memory_percent(&mut self) -> f32;
}

/// Metrics sampled through sysinfo
pub struct SysinfoMetrics {
    system: System,
}

impl SysinfoMetrics {
    pub fn new() -> Self {
        let mut system = System::new();
        // CPU usage is a delta between refreshes; take the baseline now
        system.refresh_cpu_all();
        Self { system }
    }
}

impl Default for SysinfoMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for SysinfoMetrics {
    fn cpu_percent(&mut self) -> f32 {
        self.system.refresh_cpu_all();
        self.system.global_cpu_usage()
    }

    fn memory_percent(&mut self) -> f32 {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return 0.0;
        }
        (self.system.used_memory() as f64 / total as f64 * 100.0) as f32
    }
}

/// Compose the HUD line
///
/// `clock` is the formatted local time, included when present. Metrics are
/// only sampled when `show_sys` is set.
pub fn compose_hud(
    clock: Option<&str>,
    show_sys: bool,
    metrics: &mut dyn MetricsProvider,
) -> String {
    let mut hud = String::from(" [H3V3N HUD] ");
    if let Some(time) = clock {
        hud.push_str(&format!("| {} ", time));
    }
    if show_sys {
        let cpu = metrics.cpu_percent();
        let ram = metrics.memory_percent();
        hud.push_str(&format!("| CPU: {:.1}% | RAM: {:.1}% ", cpu, ram));
    }
    hud
}

/// Local wall-clock time as HH:MM:SS
pub fn local_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Stack of status messages; the HUD keeps exactly one on it
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    messages: Vec<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.messages.pop()
    }

    /// Pop the previous message and push the new one
    pub fn replace(&mut self, message: impl Into<String>) {
        self.pop();
        self.push(message);
    }

    /// The visible message
    pub fn current(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
