//! Tab strip: the visual projection of the tab registry.
//!
//! The strip is a snapshot. `App` calls [`TabStrip::resync`] after every
//! registry mutation; between mutations only titles and the active flag are
//! patched in place. Clicks become [`ChromeIntent`]s, the strip itself never
//! touches the registry.

use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::types::event::ChromeIntent;
use crate::types::tab::TabStripEntry;

#[derive(Debug, Default)]
pub struct TabStrip {
    entries: Vec<TabStripEntry>,
}

fn display_title(index: usize, title: &str) -> String {
    if title.is_empty() {
        format!("Tab {}", index + 1)
    } else {
        title.to_string()
    }
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every entry from the registry.
    pub fn resync(&mut self, registry: &TabRegistry) {
        let current = registry.current_index();
        self.entries = registry
            .surfaces()
            .iter()
            .enumerate()
            .map(|(index, surface)| TabStripEntry {
                index,
                title: display_title(index, surface.title()),
                is_active: current == Some(index),
            })
            .collect();
    }

    pub fn set_current_index(&mut self, index: usize) {
        for entry in &mut self.entries {
            entry.is_active = entry.index == index;
        }
    }

    pub fn update_title(&mut self, index: usize, title: &str) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.title = display_title(index, title);
        }
    }

    pub fn entries(&self) -> &[TabStripEntry] {
        &self.entries
    }

    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.is_active)
    }

    // Intents. Indices outside the projection (a stale button) yield nothing.

    pub fn select(&self, index: usize) -> Option<ChromeIntent> {
        self.entries.get(index).map(|_| ChromeIntent::SelectTab(index))
    }

    pub fn request_close(&self, index: usize) -> Option<ChromeIntent> {
        self.entries.get(index).map(|_| ChromeIntent::CloseTab(index))
    }

    pub fn request_duplicate(&self, index: usize) -> Option<ChromeIntent> {
        self.entries.get(index).map(|_| ChromeIntent::DuplicateTab(index))
    }

    pub fn request_reload(&self, index: usize) -> Option<ChromeIntent> {
        self.entries.get(index).map(|_| ChromeIntent::ReloadTab(index))
    }

    pub fn request_new_tab(&self) -> ChromeIntent {
        ChromeIntent::NewTab
    }
}
