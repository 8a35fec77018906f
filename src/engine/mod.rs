//! Seam between the chrome and the embedded rendering engine.
//!
//! A [`PageView`] is one engine-owned renderable view. The chrome only drives
//! it; page loading, scripting and networking happen behind this trait. URL and
//! title updates travel the other way as [`SurfaceEvent`](crate::types::event::SurfaceEvent)s.

pub mod detached;

use url::Url;

use crate::types::errors::NavigationError;
use crate::types::tab::{SurfaceId, ViewBounds};

pub use detached::{DetachedView, DetachedViewFactory, ViewCall, ViewLog};

/// Calls the chrome makes on an engine view.
pub trait PageView {
    fn load_url(&mut self, url: &Url) -> Result<(), NavigationError>;
    fn back(&mut self) -> Result<(), NavigationError>;
    fn forward(&mut self) -> Result<(), NavigationError>;
    fn reload(&mut self) -> Result<(), NavigationError>;
    fn set_visible(&mut self, visible: bool) -> Result<(), NavigationError>;
    fn set_bounds(&mut self, bounds: ViewBounds) -> Result<(), NavigationError>;
}

/// Creates engine views for new tabs. The view must report its URL and title
/// changes under the given `id`.
pub trait PageViewFactory {
    fn create_view(&mut self, id: SurfaceId, url: &Url) -> Result<Box<dyn PageView>, NavigationError>;
}
