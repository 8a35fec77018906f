use serde::{Deserialize, Serialize};
use url::Url;

/// RGB part of the acrylic tint. Only the alpha byte is user-adjustable.
pub const BRAND_RGB: u32 = 0x001F_2937;

pub const DEFAULT_HOME_PAGE: &str = "https://www.google.com";

/// Persisted browser settings. Saved and loaded as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    pub acrylic_color: AcrylicColor,
    pub theme: ThemeMode,
    pub home_page: Url,
    pub system_transparency: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            acrylic_color: AcrylicColor::DEFAULT,
            theme: ThemeMode::Dark,
            home_page: default_home_page(),
            system_transparency: true,
        }
    }
}

pub fn default_home_page() -> Url {
    Url::parse(DEFAULT_HOME_PAGE).expect("default home page is a valid URL")
}

/// Theme selection shown in the settings panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    Auto,
}

/// 32-bit ARGB tint painted behind the translucent window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AcrylicColor(u32);

impl AcrylicColor {
    pub const DEFAULT: AcrylicColor = AcrylicColor(0x661F_2937);

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Builds the brand tint with an alpha given as a slider percentage.
    /// Percentages above 100 are clamped.
    pub fn from_alpha_percent(percent: u8) -> Self {
        let percent = u32::from(percent.min(100));
        let alpha = (percent * 255 + 50) / 100;
        Self((alpha << 24) | BRAND_RGB)
    }

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Alpha as the 0-100 slider value.
    pub fn alpha_percent(self) -> u8 {
        ((u32::from(self.alpha()) * 100 + 127) / 255) as u8
    }

    pub fn rgba(self) -> (u8, u8, u8, u8) {
        (
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
            self.alpha(),
        )
    }
}

impl Default for AcrylicColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}
