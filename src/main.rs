//! H3V3N Terminal
//!
//! One transparent window, tabs of PTY-backed shells, themeable chrome with an
//! animated border and a live HUD.

use std::sync::Arc;
use std::time::{Duration, Instant};

use h3v3n::app::{App, DispatchOutcome};
use h3v3n::hud::SysinfoMetrics;
use h3v3n::input::ModifierState;
use h3v3n::managers::ShellCommand;
use h3v3n::window::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH, WindowChrome};
use h3v3n_config::ConfigStore;
use h3v3n_core::ShellSurfaceFactory;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

/// How often shell output and exits are checked
const PTY_POLL_INTERVAL: Duration = Duration::from_millis(16);

type ShellApp = App<ShellSurfaceFactory, WindowChrome, SysinfoMetrics>;

struct WinitApp {
    store: Option<ConfigStore>,
    app: Option<ShellApp>,
    modifiers: ModifierState,
    cursor_position: (f32, f32),
}

impl WinitApp {
    fn new(store: ConfigStore) -> Self {
        Self {
            store: Some(store),
            app: None,
            modifiers: ModifierState::default(),
            cursor_position: (0.0, 0.0),
        }
    }

    fn window_attributes() -> WindowAttributes {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_transparent(true)
            .with_decorations(true);

        #[cfg(target_os = "linux")]
        let attrs = {
            use h3v3n_config::APP_ID;
            let attrs =
                winit::platform::x11::WindowAttributesExtX11::with_name(attrs, APP_ID, APP_ID);
            winit::platform::wayland::WindowAttributesExtWayland::with_name(attrs, APP_ID, APP_ID)
        };

        attrs
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(app) = self.app.as_mut() else { return };
        let Some(scale_factor) = app.chrome().window().map(|w| w.scale_factor()) else {
            return;
        };
        app.resize(size, scale_factor);
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let Some(store) = self.store.take() else { return };

        let window = match event_loop.create_window(Self::window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut chrome = WindowChrome::new();
        chrome.attach(window.clone());

        self.app = Some(App::new(
            store,
            ShellSurfaceFactory::default(),
            chrome,
            SysinfoMetrics::new(),
            ShellCommand::from_env(),
            Instant::now(),
        ));
        // The grid depends on the configured font, known only after loading.
        // Font changes from the settings dialog refit it inside App.
        self.resize(window.inner_size());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let outcome = match event {
            WindowEvent::CloseRequested => DispatchOutcome::Quit,

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = ModifierState::from_winit(&m);
                DispatchOutcome::Continue
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match self.app.as_mut() {
                    Some(app) => app.handle_key(&event.logical_key, self.modifiers),
                    None => DispatchOutcome::Continue,
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = self
                    .app
                    .as_ref()
                    .and_then(|app| app.chrome().window())
                    .map_or(1.0, |window| window.scale_factor());
                let position = position.to_logical::<f32>(scale);
                self.cursor_position = (position.x, position.y);
                DispatchOutcome::Continue
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let (x, y) = self.cursor_position;
                match (self.app.as_mut(), button) {
                    (Some(app), MouseButton::Right) => app.secondary_click(x, y),
                    (Some(app), MouseButton::Left) => app.primary_click(x, y),
                    _ => DispatchOutcome::Continue,
                }
            }

            WindowEvent::Resized(size) => {
                self.resize(size);
                DispatchOutcome::Continue
            }

            _ => DispatchOutcome::Continue,
        };

        if outcome == DispatchOutcome::Quit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_mut() else { return };

        let now = Instant::now();
        app.tick(now);
        if app.poll_surfaces() == DispatchOutcome::Quit {
            event_loop.exit();
            return;
        }

        let wake = app.next_deadline().min(now + PTY_POLL_INTERVAL);
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }
}

/// The per-user store, or a temporary one when no home directory exists
fn config_store() -> ConfigStore {
    match ConfigStore::default_location() {
        Ok(store) => store,
        Err(e) => {
            log::warn!("{}; settings will not persist across sessions", e);
            ConfigStore::in_dir(std::env::temp_dir().join("h3v3n-terminal"))
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,h3v3n=info"))
        .init();
    log::info!("H3V3N terminal starting");

    h3v3n_config::desktop::install_for_current_exe();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut WinitApp::new(config_store()))?;
    Ok(())
}
