//! Translucent window background.
//!
//! [`CompositingEffect`] is the capability; `platform::select_effect` picks the
//! implementation for the running OS once at startup. Every call is best
//! effort: a failure leaves the window as it was and is reported as `false`.

use tracing::{debug, warn};

use crate::types::errors::EffectError;
use crate::types::settings::{AcrylicColor, BrowserSettings};

/// Platform compositing attribute for one window.
pub trait CompositingEffect {
    fn enable(&mut self, color: AcrylicColor) -> Result<(), EffectError>;
    fn disable(&mut self) -> Result<(), EffectError>;
}

/// Used where the OS has no compositing API.
#[derive(Debug, Default)]
pub struct NoopEffect;

impl CompositingEffect for NoopEffect {
    fn enable(&mut self, _color: AcrylicColor) -> Result<(), EffectError> {
        Err(EffectError::Unsupported)
    }

    fn disable(&mut self) -> Result<(), EffectError> {
        Err(EffectError::Unsupported)
    }
}

/// Enables the tint from `settings` when system transparency is on, removes it
/// otherwise. Returns whether the platform call succeeded.
pub fn apply_or_remove(effect: &mut dyn CompositingEffect, settings: &BrowserSettings) -> bool {
    let result = if settings.system_transparency {
        effect.enable(settings.acrylic_color)
    } else {
        effect.disable()
    };
    report(result, settings.system_transparency)
}

/// Previews `color` without touching persisted settings.
pub fn preview(effect: &mut dyn CompositingEffect, color: AcrylicColor) -> bool {
    report(effect.enable(color), true)
}

fn report(result: Result<(), EffectError>, enabling: bool) -> bool {
    match result {
        Ok(()) => true,
        Err(EffectError::Unsupported) => {
            debug!(enabling, "compositing effect unsupported");
            false
        }
        Err(e) => {
            warn!(enabling, error = %e, "compositing effect failed");
            false
        }
    }
}
