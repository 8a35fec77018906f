//! Download Manager for GBrowser.
//!
//! Picks where an engine download is written: the user's downloads directory,
//! never overwriting an existing file. Transfer and progress stay with the
//! engine.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;
use url::Url;

use crate::platform;
use crate::types::download::DownloadItem;
use crate::types::errors::DownloadError;

const FALLBACK_FILE_NAME: &str = "download";

/// Trait defining download management operations.
pub trait DownloadManagerTrait {
    fn resolve_target(&self, suggested: &str) -> Result<PathBuf, DownloadError>;
    fn accept(&mut self, url: &str, suggested: &str) -> Result<PathBuf, DownloadError>;
    fn list_downloads(&self) -> Vec<&DownloadItem>;
    fn download_dir(&self) -> &Path;
}

/// Returns `dir/name`, or the first free `dir/stem (n).ext` when taken.
pub fn dedup_path(dir: &Path, name: &str, is_taken: impl Fn(&Path) -> bool) -> PathBuf {
    let target = dir.join(name);
    if !is_taken(&target) {
        return target;
    }

    let file = Path::new(name);
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let ext = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, n, ext));
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// File name for a download: the engine's hint if it has one, else the last
/// URL path segment, else `"download"`.
pub fn suggested_file_name(url: &str, hint: Option<&Path>) -> String {
    if let Some(name) = hint.and_then(|p| p.file_name()) {
        let name = name.to_string_lossy();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    Url::parse(url)
        .ok()
        .and_then(|u| u.path_segments().and_then(|s| s.last().map(str::to_string)))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

/// Resolves download targets and remembers what it handed out.
///
/// Paths given to the engine count as taken even before the engine creates
/// the file, so two quick downloads of the same name never collide.
pub struct DownloadManager {
    dir: PathBuf,
    reserved: HashSet<PathBuf>,
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    /// Uses `dir_override`, or the platform downloads directory.
    pub fn new(dir_override: Option<PathBuf>) -> Self {
        Self {
            dir: dir_override.unwrap_or_else(platform::get_download_dir),
            reserved: HashSet::new(),
            downloads: Vec::new(),
        }
    }

    fn now_ts() -> i64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
    }

    fn clean_name(suggested: &str) -> Result<String, DownloadError> {
        Path::new(suggested)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DownloadError::InvalidFileName(suggested.to_string()))
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn resolve_target(&self, suggested: &str) -> Result<PathBuf, DownloadError> {
        let name = Self::clean_name(suggested)?;
        Ok(dedup_path(&self.dir, &name, |p| {
            p.exists() || self.reserved.contains(p)
        }))
    }

    fn accept(&mut self, url: &str, suggested: &str) -> Result<PathBuf, DownloadError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DownloadError::DirectoryUnavailable(format!("{}: {}", self.dir.display(), e)))?;

        let target = self.resolve_target(suggested)?;
        self.reserved.insert(target.clone());

        let filename = target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        info!(url, path = %target.display(), "download accepted");

        self.downloads.push(DownloadItem {
            url: url.to_string(),
            filename,
            filepath: target.clone(),
            accepted_at: Self::now_ts(),
        });
        Ok(target)
    }

    fn list_downloads(&self) -> Vec<&DownloadItem> {
        self.downloads.iter().collect()
    }

    fn download_dir(&self) -> &Path {
        &self.dir
    }
}
