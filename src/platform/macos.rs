// GBrowser paths for macOS
// Config: ~/Library/Application Support/GBrowser

use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("Library")
                .join("Application Support")
        })
        .join("GBrowser")
}
