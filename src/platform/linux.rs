// GBrowser paths for Linux
// Config: $XDG_CONFIG_HOME/gbrowser, else ~/.config/gbrowser

use std::env;
use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("gbrowser"),
        _ => dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".config")
            .join("gbrowser"),
    }
}
