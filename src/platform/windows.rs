// GBrowser platform support for Windows
// Config: %APPDATA%/GBrowser
// Acrylic blur-behind through the window composition attribute API.

use std::env;
use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"));
    appdata.join("GBrowser")
}

#[cfg(feature = "gui")]
pub use acrylic::AcrylicEffect;

#[cfg(feature = "gui")]
mod acrylic {
    use std::rc::Rc;

    use tao::window::Window;

    use crate::services::compositing::CompositingEffect;
    use crate::types::errors::EffectError;
    use crate::types::settings::AcrylicColor;

    /// Acrylic tint bound to the main window.
    pub struct AcrylicEffect {
        window: Rc<Window>,
    }

    impl AcrylicEffect {
        pub fn new(window: Rc<Window>) -> Self {
            Self { window }
        }
    }

    fn map_err(e: window_vibrancy::Error) -> EffectError {
        match e {
            window_vibrancy::Error::UnsupportedPlatformVersion(_) => EffectError::Unsupported,
            other => EffectError::Failed(other.to_string()),
        }
    }

    impl CompositingEffect for AcrylicEffect {
        fn enable(&mut self, color: AcrylicColor) -> Result<(), EffectError> {
            window_vibrancy::apply_acrylic(&*self.window, Some(color.rgba())).map_err(map_err)
        }

        fn disable(&mut self) -> Result<(), EffectError> {
            window_vibrancy::clear_acrylic(&*self.window).map_err(map_err)
        }
    }
}
