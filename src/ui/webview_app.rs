//! WebView-based browser window using `wry` + `tao`.
//!
//! Architecture:
//! - One frameless, transparent `tao` window. The compositing effect paints
//!   the translucent background behind everything.
//! - A transparent chrome webview across the top renders the title bar, tab
//!   strip and settings panel from `resources/ui/`. It talks to Rust through
//!   `window.ipc.postMessage()` and is redrawn with `window.__gb_render`.
//! - Each tab is its own child webview below the chrome, created through
//!   [`WryViewFactory`]. Only the current one is visible.
//! - All engine and IPC callbacks are forwarded to the event loop as
//!   [`UserEvent`]s; only the loop touches `App`.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Theme, Window, WindowBuilder};
use tracing::{debug, info, warn};
use url::Url;
use wry::{WebView, WebViewBuilder};

use crate::app::{App, ChromeState, APP_NAME};
use crate::ipc::{parse_message, render_script, ChromeMessage};
use crate::managers::download_manager::DownloadManager;
use crate::managers::title_chrome::WindowGeometry;
use crate::platform;
use crate::services::settings_engine::{JsonFileStore, SettingsEngine};
use crate::types::event::{ChromeIntent, SurfaceEvent, WindowCommand};
use crate::types::settings::ThemeMode;
use crate::types::tab::ViewBounds;

use super::chrome_page::chrome_html;
use super::wry_view::{build_child, rect, Container, WryViewFactory};

/// Height of the title bar plus tab strip, in logical pixels.
const CHROME_HEIGHT: f64 = 84.0;
/// Gap between the content view and the window edge.
const CONTENT_MARGIN: f64 = 6.0;

#[derive(Debug)]
pub enum UserEvent {
    /// Raw IPC body from the chrome page.
    Chrome(String),
    Surface(SurfaceEvent),
    /// A page asked for a new window.
    OpenInNewTab(Url),
}

fn content_bounds(width: f64, height: f64) -> ViewBounds {
    ViewBounds {
        x: CONTENT_MARGIN,
        y: CHROME_HEIGHT,
        width: (width - 2.0 * CONTENT_MARGIN).max(0.0),
        height: (height - CHROME_HEIGHT - CONTENT_MARGIN).max(0.0),
    }
}

fn tao_theme(theme: ThemeMode) -> Option<Theme> {
    match theme {
        ThemeMode::Dark => Some(Theme::Dark),
        ThemeMode::Light => Some(Theme::Light),
        ThemeMode::Auto => None,
    }
}

/// Everything the event loop owns.
struct Shell {
    window: Rc<Window>,
    chrome_view: WebView,
    app: App,
    settings_open: bool,
    rendered: Option<ChromeState>,
}

impl Shell {
    fn logical_size(&self) -> (f64, f64) {
        let size: LogicalSize<f64> = self.window.inner_size().to_logical(self.window.scale_factor());
        (size.width, size.height)
    }

    /// Positions the chrome and content views for the current window size.
    fn layout(&mut self) {
        let (width, height) = self.logical_size();
        let chrome = if self.settings_open {
            ViewBounds {
                x: 0.0,
                y: 0.0,
                width,
                height,
            }
        } else {
            ViewBounds {
                x: 0.0,
                y: 0.0,
                width,
                height: CHROME_HEIGHT,
            }
        };
        if let Err(e) = self.chrome_view.set_bounds(rect(chrome)) {
            warn!(error = %e, "failed to position chrome view");
        }
        self.app.set_content_bounds(content_bounds(width, height));
    }

    /// Redraws the chrome when its state changed, or always when `force`.
    fn render(&mut self, force: bool) {
        let state = self.app.chrome_state();
        if !force && self.rendered.as_ref() == Some(&state) {
            return;
        }
        let Some(script) = render_script(&state) else {
            return;
        };
        if let Err(e) = self.chrome_view.evaluate_script(&script) {
            warn!(error = %e, "failed to render chrome");
        }
        self.rendered = Some(state);
    }

    fn execute(&mut self, commands: Vec<WindowCommand>, control_flow: &mut ControlFlow) {
        for command in commands {
            debug!(?command, "window command");
            match command {
                WindowCommand::Minimize => self.window.set_minimized(true),
                WindowCommand::SetMaximized(maximized) => self.window.set_maximized(maximized),
                WindowCommand::MoveTo { x, y } => {
                    self.window.set_outer_position(LogicalPosition::new(x, y));
                }
                WindowCommand::SetTitle(title) => self.window.set_title(&title),
                WindowCommand::SetTheme(theme) => self.window.set_theme(tao_theme(theme)),
                WindowCommand::ShowSettings(open) => {
                    self.settings_open = open;
                    self.app.set_content_visible(!open);
                    self.layout();
                }
                WindowCommand::Close => {
                    info!("main window closing");
                    *control_flow = ControlFlow::Exit;
                }
            }
        }
    }

    fn on_chrome_message(&mut self, body: &str, control_flow: &mut ControlFlow) {
        let message = match parse_message(body) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "malformed chrome message");
                return;
            }
        };
        if message == ChromeMessage::UiReady {
            self.render(true);
            return;
        }
        let Some(intent) = message.into_intent(self.app.strip()) else {
            debug!("dropping chrome message for a stale tab");
            return;
        };
        let commands = self.app.handle(intent);
        self.execute(commands, control_flow);
    }

    fn on_resized(&mut self) {
        let (width, height) = self.logical_size();
        self.app.on_window_resized(width, height, self.window.is_maximized());
        self.layout();
    }

    fn on_moved(&mut self) {
        match self.window.outer_position() {
            Ok(pos) => {
                let pos: LogicalPosition<f64> = pos.to_logical(self.window.scale_factor());
                self.app.on_window_moved(pos.x, pos.y);
            }
            Err(e) => debug!(error = %e, "window position unavailable"),
        }
    }
}

fn build_chrome_view(container: &Container, proxy: EventLoopProxy<UserEvent>) -> anyhow::Result<WebView> {
    let builder = WebViewBuilder::new()
        .with_html(chrome_html())
        .with_transparent(true)
        .with_bounds(rect(ViewBounds {
            x: 0.0,
            y: 0.0,
            width: WindowGeometry::default().width,
            height: CHROME_HEIGHT,
        }))
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = proxy.send_event(UserEvent::Chrome(msg.body().clone()));
        })
        .with_devtools(cfg!(debug_assertions));

    build_child(container, builder).map_err(|e| anyhow::anyhow!("Failed to create chrome WebView: {}", e))
}

// ─── Main entry point ───

pub fn run() -> anyhow::Result<()> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let geometry = WindowGeometry::default();
    let window = WindowBuilder::new()
        .with_title(APP_NAME)
        .with_decorations(false)
        .with_transparent(true)
        .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
        .build(&event_loop)
        .context("Failed to create window")?;
    let window = Rc::new(window);

    #[cfg(target_os = "linux")]
    let container: Container = {
        use gtk::prelude::*;
        use tao::platform::unix::WindowExtUnix;
        let vbox = window.default_vbox().context("Failed to get GTK vbox")?;
        let fixed = gtk::Fixed::new();
        vbox.pack_start(&fixed, true, true, 0);
        fixed.show_all();
        fixed
    };
    #[cfg(not(target_os = "linux"))]
    let container: Container = window.clone();

    // Created before any tab so content views stack above it.
    let chrome_view = build_chrome_view(&container, proxy.clone())?;

    let settings = match SettingsEngine::load(Box::new(JsonFileStore::new(None))) {
        Ok(engine) => engine,
        Err(e) => {
            warn!(error = %e, "settings unreadable, starting with defaults");
            SettingsEngine::new(Box::new(JsonFileStore::new(None)))
        }
    };

    let downloads = Arc::new(Mutex::new(DownloadManager::new(None)));
    let factory = WryViewFactory::new(container, proxy.clone(), downloads);
    let effect = platform::select_effect(window.clone());
    let app = App::new(Box::new(factory), settings, effect).context("Failed to open the first tab")?;

    let mut shell = Shell {
        window,
        chrome_view,
        app,
        settings_open: false,
        rendered: None,
    };
    let theme = shell.app.settings().theme;
    shell.window.set_theme(tao_theme(theme));
    let title = shell.app.window_title();
    shell.window.set_title(&title);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                let applied = shell.app.on_window_shown();
                info!(acrylic = applied, "main window shown");
                shell.on_moved();
                shell.on_resized();
            }

            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => shell.on_resized(),
                WindowEvent::Moved(_) => shell.on_moved(),
                _ => {}
            },

            Event::UserEvent(user_event) => match user_event {
                UserEvent::Chrome(body) => shell.on_chrome_message(&body, control_flow),
                UserEvent::Surface(surface_event) => {
                    let commands = shell.app.on_surface_event(surface_event);
                    shell.execute(commands, control_flow);
                }
                UserEvent::OpenInNewTab(url) => {
                    debug!(%url, "page requested a new window");
                    let commands = shell.app.handle(ChromeIntent::OpenInNewTab(url));
                    shell.execute(commands, control_flow);
                }
            },

            Event::MainEventsCleared => shell.render(false),

            _ => {}
        }
    })
}
