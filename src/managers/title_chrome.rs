//! Title bar state: address field, maximize state, and the drag gesture.
//!
//! All coordinates are logical pixels. The shell reports window moves and
//! resizes; the chrome answers gestures with [`WindowCommand`]s.

use url::Url;

use crate::types::event::WindowCommand;

/// Vertical grab offset used when a maximized window is torn off.
const TEAR_OFF_GRAB_Y: f64 = 10.0;

/// Last known window placement while not maximized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1200.0,
            height: 780.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Pressed on a maximized window; `rel_x` is the press position as a
    /// fraction of the chrome width.
    Maximizing { rel_x: f64 },
    /// Ordinary move; cursor offset from the window origin.
    Moving { offset_x: f64, offset_y: f64 },
}

#[derive(Debug, Default)]
pub struct TitleChrome {
    address: String,
    maximized: bool,
    normal: WindowGeometry,
    drag: Option<DragState>,
}

impl TitleChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, url: &Url) {
        self.address = url.to_string();
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    pub fn normal_geometry(&self) -> WindowGeometry {
        self.normal
    }

    pub fn on_window_moved(&mut self, x: f64, y: f64) {
        if !self.maximized {
            self.normal.x = x;
            self.normal.y = y;
        }
    }

    pub fn on_window_resized(&mut self, width: f64, height: f64, maximized: bool) {
        self.maximized = maximized;
        if !maximized {
            self.normal.width = width;
            self.normal.height = height;
        }
    }

    pub fn press(&mut self, x: f64, chrome_width: f64, screen_x: f64, screen_y: f64) {
        self.drag = Some(if self.maximized {
            DragState::Maximizing {
                rel_x: x / chrome_width.max(1.0),
            }
        } else {
            DragState::Moving {
                offset_x: screen_x - self.normal.x,
                offset_y: screen_y - self.normal.y,
            }
        });
    }

    /// Continue a drag. A drag that began on a maximized window restores it
    /// first and keeps the cursor at the same relative spot of the title bar.
    pub fn drag_to(&mut self, screen_x: f64, screen_y: f64) -> Vec<WindowCommand> {
        let mut commands = Vec::new();
        let (offset_x, offset_y) = match self.drag {
            None => return commands,
            Some(DragState::Maximizing { rel_x }) => {
                self.maximized = false;
                commands.push(WindowCommand::SetMaximized(false));
                let offset = ((self.normal.width * rel_x).trunc(), TEAR_OFF_GRAB_Y);
                self.drag = Some(DragState::Moving {
                    offset_x: offset.0,
                    offset_y: offset.1,
                });
                offset
            }
            Some(DragState::Moving { offset_x, offset_y }) => (offset_x, offset_y),
        };
        let x = screen_x - offset_x;
        let y = screen_y - offset_y;
        self.normal.x = x;
        self.normal.y = y;
        commands.push(WindowCommand::MoveTo { x, y });
        commands
    }

    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Double-click on the title bar and the maximize button both land here.
    pub fn toggle_maximize(&mut self) -> WindowCommand {
        self.maximized = !self.maximized;
        WindowCommand::SetMaximized(self.maximized)
    }
}
