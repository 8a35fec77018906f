//! Message format between the chrome page and the shell.
//!
//! The chrome page posts JSON objects tagged by `cmd` through
//! `window.ipc.postMessage`. Tab-strip messages are checked against the
//! strip's projection before they become intents, so a click on a button from
//! a stale render is dropped.

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::managers::tab_strip::TabStrip;
use crate::types::event::{ChromeIntent, SettingsForm};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChromeMessage {
    /// Page loaded and wants a full render.
    UiReady,
    SelectTab { index: usize },
    CloseTab { index: usize },
    NewTab,
    DuplicateTab { index: usize },
    ReloadTab { index: usize },
    Back,
    Forward,
    Reload,
    Navigate { text: String },
    Minimize,
    ToggleMaximize,
    Close,
    DragPress { x: f64, width: f64, screen_x: f64, screen_y: f64 },
    DragMove { screen_x: f64, screen_y: f64 },
    DragRelease,
    OpenSettings,
    PreviewAlpha { percent: u8 },
    SaveSettings { form: SettingsForm },
    CancelSettings,
}

pub fn parse_message(body: &str) -> Result<ChromeMessage, serde_json::Error> {
    serde_json::from_str(body)
}

impl ChromeMessage {
    /// Converts the message into an intent. `UiReady` and stale tab indices
    /// yield `None`.
    pub fn into_intent(self, strip: &TabStrip) -> Option<ChromeIntent> {
        let intent = match self {
            ChromeMessage::UiReady => return None,
            ChromeMessage::SelectTab { index } => return strip.select(index),
            ChromeMessage::CloseTab { index } => return strip.request_close(index),
            ChromeMessage::DuplicateTab { index } => return strip.request_duplicate(index),
            ChromeMessage::ReloadTab { index } => return strip.request_reload(index),
            ChromeMessage::NewTab => strip.request_new_tab(),
            ChromeMessage::Back => ChromeIntent::Back,
            ChromeMessage::Forward => ChromeIntent::Forward,
            ChromeMessage::Reload => ChromeIntent::Reload,
            ChromeMessage::Navigate { text } => ChromeIntent::Navigate(text),
            ChromeMessage::Minimize => ChromeIntent::Minimize,
            ChromeMessage::ToggleMaximize => ChromeIntent::ToggleMaximize,
            ChromeMessage::Close => ChromeIntent::CloseWindow,
            ChromeMessage::DragPress {
                x,
                width,
                screen_x,
                screen_y,
            } => ChromeIntent::DragPress {
                x,
                chrome_width: width,
                screen_x,
                screen_y,
            },
            ChromeMessage::DragMove { screen_x, screen_y } => {
                ChromeIntent::DragMove { screen_x, screen_y }
            }
            ChromeMessage::DragRelease => ChromeIntent::DragRelease,
            ChromeMessage::OpenSettings => ChromeIntent::OpenSettings,
            ChromeMessage::PreviewAlpha { percent } => ChromeIntent::PreviewAlpha(percent),
            ChromeMessage::SaveSettings { form } => ChromeIntent::SaveSettings(form),
            ChromeMessage::CancelSettings => ChromeIntent::CancelSettings,
        };
        Some(intent)
    }
}

/// Script that hands `state` to the chrome page's renderer, or `None` when the
/// state cannot be serialized.
pub fn render_script<S: Serialize>(state: &S) -> Option<String> {
    match serde_json::to_string(state) {
        Ok(json) => Some(format!("if(window.__gb_render)window.__gb_render({})", json)),
        Err(e) => {
            warn!(error = %e, "chrome state not serializable");
            None
        }
    }
}

/// Only web pages may be opened from engine new-window requests.
pub fn is_web_url(url: &str) -> Option<Url> {
    Url::parse(url)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}
