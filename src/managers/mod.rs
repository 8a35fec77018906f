// GBrowser state managers
// Managers own the chrome's mutable state: tabs, tab strip, title bar, settings panel, downloads.

pub mod download_manager;
pub mod navigation_surface;
pub mod settings_panel;
pub mod tab_registry;
pub mod tab_strip;
pub mod title_chrome;
