//! Engine views with no renderer behind them.
//!
//! Used by the headless build and by tests: every call is appended to a shared
//! [`ViewLog`] so callers can assert what the chrome asked the engine to do.

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use super::{PageView, PageViewFactory};
use crate::types::errors::NavigationError;
use crate::types::tab::{SurfaceId, ViewBounds};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Created(Url),
    Load(Url),
    Back,
    Forward,
    Reload,
    Visible(bool),
    Bounds(ViewBounds),
}

/// Shared, append-only record of engine calls keyed by surface.
#[derive(Debug, Clone, Default)]
pub struct ViewLog(Rc<RefCell<Vec<(SurfaceId, ViewCall)>>>);

impl ViewLog {
    fn push(&self, id: SurfaceId, call: ViewCall) {
        self.0.borrow_mut().push((id, call));
    }

    pub fn calls(&self) -> Vec<(SurfaceId, ViewCall)> {
        self.0.borrow().clone()
    }

    pub fn calls_for(&self, id: SurfaceId) -> Vec<ViewCall> {
        self.0
            .borrow()
            .iter()
            .filter(|(sid, _)| *sid == id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct DetachedView {
    id: SurfaceId,
    log: ViewLog,
}

impl PageView for DetachedView {
    fn load_url(&mut self, url: &Url) -> Result<(), NavigationError> {
        self.log.push(self.id, ViewCall::Load(url.clone()));
        Ok(())
    }

    fn back(&mut self) -> Result<(), NavigationError> {
        self.log.push(self.id, ViewCall::Back);
        Ok(())
    }

    fn forward(&mut self) -> Result<(), NavigationError> {
        self.log.push(self.id, ViewCall::Forward);
        Ok(())
    }

    fn reload(&mut self) -> Result<(), NavigationError> {
        self.log.push(self.id, ViewCall::Reload);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), NavigationError> {
        self.log.push(self.id, ViewCall::Visible(visible));
        Ok(())
    }

    fn set_bounds(&mut self, bounds: ViewBounds) -> Result<(), NavigationError> {
        self.log.push(self.id, ViewCall::Bounds(bounds));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetachedViewFactory {
    log: ViewLog,
}

impl DetachedViewFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> ViewLog {
        self.log.clone()
    }
}

impl PageViewFactory for DetachedViewFactory {
    fn create_view(&mut self, id: SurfaceId, url: &Url) -> Result<Box<dyn PageView>, NavigationError> {
        self.log.push(id, ViewCall::Created(url.clone()));
        Ok(Box::new(DetachedView {
            id,
            log: self.log.clone(),
        }))
    }
}
