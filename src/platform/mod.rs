// GBrowser platform abstraction
// Platform-specific paths, plus selection of the window compositing effect.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for GBrowser.
///
/// - **Linux**: `~/.config/gbrowser` (or `$XDG_CONFIG_HOME/gbrowser`)
/// - **macOS**: `~/Library/Application Support/GBrowser`
/// - **Windows**: `%APPDATA%/GBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the user's downloads directory, falling back to `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("Downloads")
    })
}

/// Picks the compositing effect for `window`: acrylic on Windows, a no-op
/// everywhere else.
#[cfg(feature = "gui")]
pub fn select_effect(
    window: std::rc::Rc<tao::window::Window>,
) -> Box<dyn crate::services::compositing::CompositingEffect> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::AcrylicEffect::new(window))
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = window;
        Box::new(crate::services::compositing::NoopEffect)
    }
}
