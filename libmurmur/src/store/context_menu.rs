//! Long-press context menu placement

use super::Store;
use crate::reactive::{Observable, ReadOnly};
use crate::types::{MenuPosition, PressEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContextMenuState {
    pub visible: bool,
    /// Meaningful only while `visible`; left stale after close.
    pub position: MenuPosition,
}

pub struct ContextMenuStore {
    state: Observable<ContextMenuState>,
}

impl Store for ContextMenuStore {
    const NAME: &'static str = "context_menu";
}

impl ContextMenuStore {
    pub fn new() -> Self {
        Self {
            state: Observable::new(ContextMenuState::default()),
        }
    }

    /// Anchor the menu at the top edge of the pressed element and show it.
    ///
    /// `y = absolute_y - local_y`, `x = 0`. Negative results pass through.
    pub fn on_long_press(&self, event: PressEvent) {
        let position = MenuPosition {
            x: 0.0,
            y: event.absolute_y() - event.local_y(),
        };
        tracing::debug!(store = Self::NAME, y = position.y, "Context menu opened");
        self.state.set(ContextMenuState {
            visible: true,
            position,
        });
    }

    pub fn close(&self) {
        tracing::debug!(store = Self::NAME, "Context menu closed");
        self.state.update(|s| s.visible = false);
    }

    pub fn position(&self) -> MenuPosition {
        self.state.with(|s| s.position)
    }

    pub fn is_visible(&self) -> bool {
        self.state.with(|s| s.visible)
    }

    pub fn state(&self) -> ReadOnly<ContextMenuState> {
        self.state.read_only()
    }
}

impl Default for ContextMenuStore {
    fn default() -> Self {
        Self::new()
    }
}
