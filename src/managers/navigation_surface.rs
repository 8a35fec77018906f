//! One tab's content: an engine view plus the navigation state the chrome shows.

use url::Url;

use crate::engine::PageView;
use crate::types::errors::NavigationError;
use crate::types::tab::{SurfaceId, ViewBounds};

pub const BLANK_PAGE: &str = "about:blank";

/// The sentinel page used for replacement tabs.
pub fn blank_page() -> Url {
    Url::parse(BLANK_PAGE).expect("about:blank is a valid URL")
}

/// A tab's renderable view and its url/title/history state.
///
/// History is tracked here rather than queried from the engine: every URL the
/// surface settles on is recorded, and `can_go_back`/`can_go_forward` follow
/// the cursor into that list. A back or forward request only marks the entry
/// it expects; the cursor moves when the engine reports arriving there.
pub struct NavigationSurface {
    id: SurfaceId,
    url: Url,
    title: String,
    history: Vec<Url>,
    cursor: usize,
    pending: Option<usize>,
    view: Box<dyn PageView>,
}

impl NavigationSurface {
    pub fn new(id: SurfaceId, url: Url, label: &str, view: Box<dyn PageView>) -> Self {
        Self {
            id,
            history: vec![url.clone()],
            url,
            title: label.to_string(),
            cursor: 0,
            pending: None,
            view,
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn can_go_back(&self) -> bool {
        self.target() > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.target() + 1 < self.history.len()
    }

    /// The history entry the engine is heading to.
    fn target(&self) -> usize {
        self.pending.unwrap_or(self.cursor)
    }

    /// Loads `url` in this surface and records it as a new history entry.
    pub fn navigate(&mut self, url: Url) -> Result<(), NavigationError> {
        self.view.load_url(&url)?;
        self.pending = None;
        self.record(url);
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), NavigationError> {
        if !self.can_go_back() {
            return Err(NavigationError::NoBackHistory);
        }
        self.view.back()?;
        self.pending = Some(self.target() - 1);
        Ok(())
    }

    pub fn forward(&mut self) -> Result<(), NavigationError> {
        if !self.can_go_forward() {
            return Err(NavigationError::NoForwardHistory);
        }
        self.view.forward()?;
        self.pending = Some(self.target() + 1);
        Ok(())
    }

    pub fn reload(&mut self) -> Result<(), NavigationError> {
        self.view.reload()
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), NavigationError> {
        self.view.set_visible(visible)
    }

    pub fn set_bounds(&mut self, bounds: ViewBounds) -> Result<(), NavigationError> {
        self.view.set_bounds(bounds)
    }

    /// Applies an engine-reported URL. Returns `false` when the URL is the one
    /// already shown, so repeated delivery is harmless.
    ///
    /// Arriving at the entry a back/forward request expects moves the cursor;
    /// any other URL is a new history entry.
    pub fn apply_url_changed(&mut self, url: Url) -> bool {
        if url == self.url {
            return false;
        }
        match self.pending.take() {
            Some(target) if self.history[target] == url => {
                self.cursor = target;
                self.url = url;
            }
            _ => self.record(url),
        }
        true
    }

    /// Applies an engine-reported title. Returns `false` if unchanged.
    pub fn apply_title_changed(&mut self, title: &str) -> bool {
        if self.title == title {
            return false;
        }
        self.title = title.to_string();
        true
    }

    fn record(&mut self, url: Url) {
        if self.history[self.cursor] == url {
            self.url = url;
            return;
        }
        self.history.truncate(self.cursor + 1);
        self.history.push(url.clone());
        self.cursor += 1;
        self.url = url;
    }
}
