//! App Core for GBrowser.
//!
//! `App` is the main window's brain: it owns the tab registry, the tab strip,
//! the title bar state, the settings panel and engine, and the compositing
//! effect. The native shell feeds it chrome intents, engine
//! notifications and window events; it answers with [`WindowCommand`]s and a
//! [`ChromeState`] snapshot to render. Only `App` mutates the registry.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::PageViewFactory;
use crate::managers::settings_panel::SettingsPanel;
use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait, NEW_TAB_LABEL};
use crate::managers::tab_strip::TabStrip;
use crate::managers::title_chrome::TitleChrome;
use crate::services::address::normalize_address;
use crate::services::compositing::{self, CompositingEffect};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{ChromeError, TabError};
use crate::types::event::{ChromeIntent, SettingsForm, SurfaceChange, SurfaceEvent, WindowCommand};
use crate::types::settings::{BrowserSettings, ThemeMode};
use crate::types::tab::{TabStripEntry, ViewBounds};

pub const APP_NAME: &str = "GBrowser";

/// Everything the chrome page needs to draw itself.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChromeState {
    pub tabs: Vec<TabStripEntry>,
    pub address: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub maximized: bool,
    pub theme: ThemeMode,
    pub settings_form: Option<SettingsForm>,
}

pub struct App {
    registry: TabRegistry,
    strip: TabStrip,
    chrome: TitleChrome,
    panel: SettingsPanel,
    settings: SettingsEngine,
    effect: Box<dyn CompositingEffect>,
}

impl App {
    /// Builds the window state and opens the home page in the first tab.
    pub fn new(
        factory: Box<dyn PageViewFactory>,
        settings: SettingsEngine,
        effect: Box<dyn CompositingEffect>,
    ) -> Result<Self, TabError> {
        let mut app = Self {
            registry: TabRegistry::new(factory),
            strip: TabStrip::new(),
            chrome: TitleChrome::new(),
            panel: SettingsPanel::new(),
            settings,
            effect,
        };
        let home = app.settings.settings().home_page.clone();
        app.registry.add_tab(home, NEW_TAB_LABEL)?;
        app.sync_after_mutation();
        info!(tabs = app.registry.len(), "main window ready");
        Ok(app)
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn chrome(&self) -> &TitleChrome {
        &self.chrome
    }

    pub fn panel(&self) -> &SettingsPanel {
        &self.panel
    }

    pub fn settings(&self) -> &BrowserSettings {
        self.settings.settings()
    }

    pub fn chrome_state(&self) -> ChromeState {
        let current = self.registry.current_surface().ok();
        ChromeState {
            tabs: self.strip.entries().to_vec(),
            address: self.chrome.address().to_string(),
            can_go_back: current.is_some_and(|s| s.can_go_back()),
            can_go_forward: current.is_some_and(|s| s.can_go_forward()),
            maximized: self.chrome.is_maximized(),
            theme: self.settings.settings().theme,
            settings_form: self.panel.form().cloned(),
        }
    }

    pub fn window_title(&self) -> String {
        match self.registry.current_surface() {
            Ok(s) if !s.title().is_empty() => format!("{} - {}", s.title(), APP_NAME),
            _ => APP_NAME.to_string(),
        }
    }

    /// Applies one chrome intent. Failures are logged and yield no commands.
    pub fn handle(&mut self, intent: ChromeIntent) -> Vec<WindowCommand> {
        debug!(?intent, "chrome intent");
        match self.dispatch(intent) {
            Ok(commands) => commands,
            Err(e) => {
                warn!(error = %e, "chrome action failed");
                Vec::new()
            }
        }
    }

    fn dispatch(&mut self, intent: ChromeIntent) -> Result<Vec<WindowCommand>, ChromeError> {
        let commands = match intent {
            ChromeIntent::SelectTab(index) => {
                self.registry.set_current_index(index)?;
                self.strip.set_current_index(index);
                self.sync_address();
                vec![self.title_command()]
            }
            ChromeIntent::CloseTab(index) => {
                self.registry.remove_tab(index)?;
                self.sync_after_mutation()
            }
            ChromeIntent::NewTab => {
                let home = self.settings.settings().home_page.clone();
                self.registry.add_tab(home, NEW_TAB_LABEL)?;
                self.sync_after_mutation()
            }
            ChromeIntent::OpenInNewTab(url) => {
                self.registry.add_tab(url, NEW_TAB_LABEL)?;
                self.sync_after_mutation()
            }
            ChromeIntent::DuplicateTab(index) => {
                self.registry.duplicate(index)?;
                self.sync_after_mutation()
            }
            ChromeIntent::ReloadTab(index) => {
                let len = self.registry.len();
                self.registry
                    .surface_mut(index)
                    .ok_or(TabError::InvalidIndex { index, len })?
                    .reload()?;
                Vec::new()
            }
            ChromeIntent::Back => {
                self.registry.current_surface_mut()?.back()?;
                self.sync_address();
                Vec::new()
            }
            ChromeIntent::Forward => {
                self.registry.current_surface_mut()?.forward()?;
                self.sync_address();
                Vec::new()
            }
            ChromeIntent::Reload => {
                self.registry.current_surface_mut()?.reload()?;
                Vec::new()
            }
            ChromeIntent::Navigate(text) => {
                let Some(url) = normalize_address(&text) else {
                    debug!(input = %text, "ignoring unusable address");
                    return Ok(Vec::new());
                };
                self.registry.current_surface_mut()?.navigate(url)?;
                self.sync_after_mutation()
            }
            ChromeIntent::Minimize => vec![WindowCommand::Minimize],
            ChromeIntent::ToggleMaximize => vec![self.chrome.toggle_maximize()],
            ChromeIntent::CloseWindow => vec![WindowCommand::Close],
            ChromeIntent::DragPress {
                x,
                chrome_width,
                screen_x,
                screen_y,
            } => {
                self.chrome.press(x, chrome_width, screen_x, screen_y);
                Vec::new()
            }
            ChromeIntent::DragMove { screen_x, screen_y } => self.chrome.drag_to(screen_x, screen_y),
            ChromeIntent::DragRelease => {
                self.chrome.release();
                Vec::new()
            }
            ChromeIntent::OpenSettings => {
                self.panel.open(self.settings.settings());
                vec![WindowCommand::ShowSettings(true)]
            }
            ChromeIntent::PreviewAlpha(percent) => {
                if let Some(color) = self.panel.preview_alpha(percent) {
                    compositing::preview(&mut *self.effect, color);
                }
                Vec::new()
            }
            ChromeIntent::SaveSettings(form) => self.save_settings(form),
            ChromeIntent::CancelSettings => {
                self.panel.cancel();
                self.apply_effect();
                vec![WindowCommand::ShowSettings(false)]
            }
        };
        Ok(commands)
    }

    fn save_settings(&mut self, form: SettingsForm) -> Vec<WindowCommand> {
        let saved = self.panel.save(form, self.settings.settings());
        let theme = saved.theme;
        if let Err(e) = self.settings.save(saved) {
            warn!(error = %e, "failed to persist settings");
        }
        info!(?theme, transparency = self.settings.settings().system_transparency, "settings saved");
        self.apply_effect();
        vec![WindowCommand::ShowSettings(false), WindowCommand::SetTheme(theme)]
    }

    /// Engine notification for one surface. URL changes reach the address bar
    /// only for the current tab; title changes only touch the strip.
    pub fn on_surface_event(&mut self, event: SurfaceEvent) -> Vec<WindowCommand> {
        let change = event.change.clone();
        let Some(index) = self.registry.apply_event(event) else {
            return Vec::new();
        };
        let is_current = self.registry.current_index() == Some(index);
        match change {
            SurfaceChange::UrlChanged(url) => {
                if is_current {
                    self.chrome.set_address(&url);
                }
                Vec::new()
            }
            SurfaceChange::TitleChanged(title) => {
                self.strip.update_title(index, &title);
                if is_current {
                    vec![self.title_command()]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Window became visible: apply or remove the translucent background.
    pub fn on_window_shown(&mut self) -> bool {
        self.apply_effect()
    }

    pub fn on_window_moved(&mut self, x: f64, y: f64) {
        self.chrome.on_window_moved(x, y);
    }

    pub fn on_window_resized(&mut self, width: f64, height: f64, maximized: bool) {
        self.chrome.on_window_resized(width, height, maximized);
    }

    pub fn set_content_bounds(&mut self, bounds: ViewBounds) {
        self.registry.set_bounds(bounds);
    }

    pub fn set_content_visible(&mut self, visible: bool) {
        self.registry.set_current_visible(visible);
    }

    /// Re-reads persisted settings and re-applies the effect.
    pub fn reload_settings(&mut self) -> Vec<WindowCommand> {
        if let Err(e) = self.settings.reload() {
            warn!(error = %e, "failed to reload settings");
        }
        self.apply_effect();
        vec![WindowCommand::SetTheme(self.settings.settings().theme)]
    }

    fn apply_effect(&mut self) -> bool {
        compositing::apply_or_remove(&mut *self.effect, self.settings.settings())
    }

    /// Registry changed shape: rebuild the strip, then refresh the address.
    fn sync_after_mutation(&mut self) -> Vec<WindowCommand> {
        self.strip.resync(&self.registry);
        self.sync_address();
        vec![self.title_command()]
    }

    fn sync_address(&mut self) {
        if let Ok(surface) = self.registry.current_surface() {
            self.chrome.set_address(surface.url());
        }
    }

    fn title_command(&self) -> WindowCommand {
        WindowCommand::SetTitle(self.window_title())
    }
}
