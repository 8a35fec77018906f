use thiserror::Error;

// === TabError ===

/// Errors related to tab registry operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// The registry holds no tabs, so there is no current surface.
    #[error("No current tab")]
    NoCurrentTab,
    /// The provided tab index is out of bounds.
    #[error("Invalid tab index: {index} (tab count: {len})")]
    InvalidIndex { index: usize, len: usize },
    /// The engine could not create a view for a new tab.
    #[error("Failed to create tab view: {0}")]
    ViewCreation(#[from] NavigationError),
}

// === NavigationError ===

/// Errors raised by a navigation surface or its engine view.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// There is no earlier history entry to go back to.
    #[error("Cannot go back: already at the first history entry")]
    NoBackHistory,
    /// There is no later history entry to go forward to.
    #[error("Cannot go forward: already at the last history entry")]
    NoForwardHistory,
    /// The embedded engine rejected the call.
    #[error("Engine error: {0}")]
    Engine(String),
}

// === ChromeError ===

/// Failure of a single chrome action. Logged at the handler boundary and
/// never propagated past it.
#[derive(Debug, Error)]
pub enum ChromeError {
    #[error(transparent)]
    Tab(#[from] TabError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The stored value for a key has the wrong shape.
    #[error("Invalid settings value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

// === DownloadError ===

/// Errors related to download target resolution.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The suggested file name is empty or only path separators.
    #[error("Download has no usable file name: {0:?}")]
    InvalidFileName(String),
    /// The downloads directory could not be created.
    #[error("Download directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

// === EffectError ===

/// Errors from the platform compositing call.
#[derive(Debug, Error)]
pub enum EffectError {
    /// The compositing API does not exist on this platform.
    #[error("Compositing effect unsupported on this platform")]
    Unsupported,
    /// The platform call was made and failed.
    #[error("Compositing call failed: {0}")]
    Failed(String),
}
