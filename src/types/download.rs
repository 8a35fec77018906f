use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A download the shell has accepted and handed back to the engine.
/// Progress and completion stay with the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadItem {
    pub url: String,
    pub filename: String,
    pub filepath: PathBuf,
    pub accepted_at: i64,
}
