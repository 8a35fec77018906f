use serde::{Deserialize, Serialize};
use url::Url;

use super::settings::BrowserSettings;
use super::tab::SurfaceId;

/// Notification from the engine about one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceEvent {
    pub id: SurfaceId,
    pub change: SurfaceChange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceChange {
    UrlChanged(Url),
    TitleChanged(String),
}

/// User intent raised by the chrome (title bar, tab strip, settings panel).
/// Intents never mutate state by themselves; `App` applies them.
#[derive(Debug, Clone, PartialEq)]
pub enum ChromeIntent {
    // tab strip
    SelectTab(usize),
    CloseTab(usize),
    NewTab,
    DuplicateTab(usize),
    ReloadTab(usize),
    // title bar
    Back,
    Forward,
    Reload,
    Navigate(String),
    OpenInNewTab(Url),
    Minimize,
    ToggleMaximize,
    CloseWindow,
    DragPress { x: f64, chrome_width: f64, screen_x: f64, screen_y: f64 },
    DragMove { screen_x: f64, screen_y: f64 },
    DragRelease,
    // settings panel
    OpenSettings,
    PreviewAlpha(u8),
    SaveSettings(SettingsForm),
    CancelSettings,
}

/// Raw values submitted by the settings form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub alpha_percent: u8,
    pub theme: super::settings::ThemeMode,
    pub home_page: String,
    pub system_transparency: bool,
}

impl From<&BrowserSettings> for SettingsForm {
    fn from(settings: &BrowserSettings) -> Self {
        Self {
            alpha_percent: settings.acrylic_color.alpha_percent(),
            theme: settings.theme,
            home_page: settings.home_page.to_string(),
            system_transparency: settings.system_transparency,
        }
    }
}

/// Side effect on the native window that `App` asks the shell to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    Minimize,
    SetMaximized(bool),
    MoveTo { x: f64, y: f64 },
    SetTitle(String),
    SetTheme(super::settings::ThemeMode),
    ShowSettings(bool),
    Close,
}
