//! Modal settings form.
//!
//! Holds the form values while the panel is open. Saving turns the form into a
//! complete [`BrowserSettings`] value; nothing is persisted here.

use tracing::debug;

use crate::services::address::normalize_address;
use crate::types::event::SettingsForm;
use crate::types::settings::{AcrylicColor, BrowserSettings};

#[derive(Debug, Default)]
pub struct SettingsPanel {
    form: Option<SettingsForm>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, settings: &BrowserSettings) {
        self.form = Some(SettingsForm::from(settings));
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&SettingsForm> {
        self.form.as_ref()
    }

    /// Slider moved. Returns the tint to preview, or `None` if closed.
    pub fn preview_alpha(&mut self, percent: u8) -> Option<AcrylicColor> {
        let form = self.form.as_mut()?;
        form.alpha_percent = percent.min(100);
        Some(AcrylicColor::from_alpha_percent(form.alpha_percent))
    }

    /// Close the panel and build the saved settings. A home page that does not
    /// normalize to a URL keeps the previous one.
    pub fn save(&mut self, submitted: SettingsForm, current: &BrowserSettings) -> BrowserSettings {
        self.form = None;
        let home_page = normalize_address(&submitted.home_page).unwrap_or_else(|| {
            debug!(input = %submitted.home_page, "keeping previous home page");
            current.home_page.clone()
        });
        BrowserSettings {
            acrylic_color: AcrylicColor::from_alpha_percent(submitted.alpha_percent),
            theme: submitted.theme,
            home_page,
            system_transparency: submitted.system_transparency,
        }
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }
}
