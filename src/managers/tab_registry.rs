use tracing::{debug, warn};
use url::Url;

use crate::engine::PageViewFactory;
use crate::managers::navigation_surface::{blank_page, NavigationSurface};
use crate::types::errors::TabError;
use crate::types::event::{SurfaceChange, SurfaceEvent};
use crate::types::tab::{SurfaceId, ViewBounds};

pub const NEW_TAB_LABEL: &str = "New Tab";
pub const DUPLICATE_LABEL: &str = "Copy";

/// Trait defining the tab registry interface.
pub trait TabRegistryTrait {
    fn add_tab(&mut self, url: Url, label: &str) -> Result<usize, TabError>;
    fn remove_tab(&mut self, index: usize) -> Result<(), TabError>;
    fn set_current_index(&mut self, index: usize) -> Result<(), TabError>;
    fn duplicate(&mut self, index: usize) -> Result<usize, TabError>;
    fn current_surface(&self) -> Result<&NavigationSurface, TabError>;
    fn current_surface_mut(&mut self) -> Result<&mut NavigationSurface, TabError>;
    fn current_index(&self) -> Option<usize>;
    fn surface(&self, index: usize) -> Option<&NavigationSurface>;
    fn surface_mut(&mut self, index: usize) -> Option<&mut NavigationSurface>;
    fn surfaces(&self) -> &[NavigationSurface];
    fn index_of(&self, id: SurfaceId) -> Option<usize>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn apply_event(&mut self, event: SurfaceEvent) -> Option<usize>;
    fn set_bounds(&mut self, bounds: ViewBounds);
    fn set_current_visible(&mut self, visible: bool);
}

/// Ordered tabs plus the single current selection.
///
/// Only the current surface is visible. Once the first tab exists the registry
/// never drops back to zero tabs.
pub struct TabRegistry {
    surfaces: Vec<NavigationSurface>,
    current: Option<usize>,
    bounds: Option<ViewBounds>,
    factory: Box<dyn PageViewFactory>,
}

impl TabRegistry {
    pub fn new(factory: Box<dyn PageViewFactory>) -> Self {
        Self {
            surfaces: Vec::new(),
            current: None,
            bounds: None,
            factory,
        }
    }

    fn check(&self, index: usize) -> Result<(), TabError> {
        if index >= self.surfaces.len() {
            return Err(TabError::InvalidIndex {
                index,
                len: self.surfaces.len(),
            });
        }
        Ok(())
    }

    fn show(&mut self, index: usize, visible: bool) {
        if let Some(surface) = self.surfaces.get_mut(index) {
            if let Err(e) = surface.set_visible(visible) {
                warn!(tab = index, error = %e, "failed to change tab visibility");
            }
        }
    }

    fn push_surface(&mut self, url: Url, label: &str) -> Result<usize, TabError> {
        let id = SurfaceId::new();
        let view = self.factory.create_view(id, &url)?;
        let mut surface = NavigationSurface::new(id, url, label, view);
        if let Some(bounds) = self.bounds {
            if let Err(e) = surface.set_bounds(bounds) {
                warn!(%id, error = %e, "failed to size new tab view");
            }
        }
        self.surfaces.push(surface);
        let index = self.surfaces.len() - 1;
        if let Some(prev) = self.current {
            self.show(prev, false);
        }
        self.current = Some(index);
        self.show(index, true);
        debug!(tab = index, %id, "tab added");
        Ok(index)
    }
}

impl TabRegistryTrait for TabRegistry {
    /// Append a tab showing `url` and make it current. Returns its index.
    fn add_tab(&mut self, url: Url, label: &str) -> Result<usize, TabError> {
        self.push_surface(url, label)
    }

    /// Remove the tab at `index`. Removing the only tab first appends a blank
    /// replacement, so the registry is never observed empty.
    fn remove_tab(&mut self, index: usize) -> Result<(), TabError> {
        self.check(index)?;

        if self.surfaces.len() == 1 {
            self.push_surface(blank_page(), NEW_TAB_LABEL)?;
        }

        let current = self.current.unwrap_or(0);
        let removed = self.surfaces.remove(index);
        debug!(tab = index, id = %removed.id(), "tab removed");
        drop(removed);

        let last = self.surfaces.len() - 1;
        if index == current {
            let next = index.min(last);
            self.current = Some(next);
            self.show(next, true);
        } else if index < current {
            self.current = Some(current - 1);
        }
        Ok(())
    }

    fn set_current_index(&mut self, index: usize) -> Result<(), TabError> {
        self.check(index)?;
        if self.current == Some(index) {
            return Ok(());
        }
        if let Some(prev) = self.current {
            self.show(prev, false);
        }
        self.current = Some(index);
        self.show(index, true);
        Ok(())
    }

    /// Open a copy of the tab at `index` at the end of the strip.
    fn duplicate(&mut self, index: usize) -> Result<usize, TabError> {
        self.check(index)?;
        let url = self.surfaces[index].url().clone();
        self.push_surface(url, DUPLICATE_LABEL)
    }

    fn current_surface(&self) -> Result<&NavigationSurface, TabError> {
        self.current
            .and_then(|i| self.surfaces.get(i))
            .ok_or(TabError::NoCurrentTab)
    }

    fn current_surface_mut(&mut self) -> Result<&mut NavigationSurface, TabError> {
        self.current
            .and_then(|i| self.surfaces.get_mut(i))
            .ok_or(TabError::NoCurrentTab)
    }

    fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn surface(&self, index: usize) -> Option<&NavigationSurface> {
        self.surfaces.get(index)
    }

    fn surface_mut(&mut self, index: usize) -> Option<&mut NavigationSurface> {
        self.surfaces.get_mut(index)
    }

    fn surfaces(&self) -> &[NavigationSurface] {
        &self.surfaces
    }

    fn index_of(&self, id: SurfaceId) -> Option<usize> {
        self.surfaces.iter().position(|s| s.id() == id)
    }

    fn len(&self) -> usize {
        self.surfaces.len()
    }

    fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Apply an engine notification. Returns the tab's current index when the
    /// event changed something; events for closed tabs are dropped.
    fn apply_event(&mut self, event: SurfaceEvent) -> Option<usize> {
        let Some(index) = self.index_of(event.id) else {
            debug!(id = %event.id, "dropping event for closed tab");
            return None;
        };
        let surface = &mut self.surfaces[index];
        let changed = match event.change {
            SurfaceChange::UrlChanged(url) => surface.apply_url_changed(url),
            SurfaceChange::TitleChanged(title) => surface.apply_title_changed(&title),
        };
        changed.then_some(index)
    }

    /// Resize every content view; new tabs pick up the same bounds.
    fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = Some(bounds);
        for surface in &mut self.surfaces {
            if let Err(e) = surface.set_bounds(bounds) {
                warn!(id = %surface.id(), error = %e, "failed to resize tab view");
            }
        }
    }

    /// Hide or show the current tab's view without changing the selection,
    /// e.g. while a modal panel covers the content area.
    fn set_current_visible(&mut self, visible: bool) {
        if let Some(index) = self.current {
            self.show(index, visible);
        }
    }
}
