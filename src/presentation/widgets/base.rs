//! Widget capability trait and shared widget state.

use std::any::Any;

use ratatui::{buffer::Buffer, layout::Rect};

use crate::domain::Bounds;
use crate::presentation::events::LauncherKey;
use crate::presentation::theme::LauncherTheme;

/// State every widget carries, managed by the owning widget set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetBase {
    /// Last computed on-screen bounds.
    pub bounds: Bounds,
    /// Hidden widgets are not drawn, hit-tested or tabbed to.
    pub hidden: bool,
    /// Whether Tab can land on this widget.
    pub tab_selectable: bool,
    /// Pointer is over the widget.
    pub hovered: bool,
    /// Widget holds keyboard focus.
    pub selected: bool,
}

impl WidgetBase {
    /// Creates visible base state.
    #[must_use]
    pub const fn new(tab_selectable: bool) -> Self {
        Self {
            bounds: Bounds::new(0, 0, 0, 0),
            hidden: false,
            tab_selectable,
            hovered: false,
            selected: false,
        }
    }
}

/// Interactive element of a screen.
///
/// Every hook has a no-op default so widgets only implement what they react to.
pub trait Widget: Any {
    /// Shared state.
    fn base(&self) -> &WidgetBase;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Natural size in cells, used when laying out.
    fn size(&self) -> (i32, i32);

    /// Renders into the buffer at the current bounds.
    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme);

    /// Whether the widget reacts to clicks on its own.
    fn handles_click(&self) -> bool {
        false
    }

    /// Internal click handling. Returns true if anything changed.
    fn on_click(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    /// Special key while selected. Returns true if the widget's content changed.
    fn on_key_down(&mut self, _key: LauncherKey) -> bool {
        false
    }

    /// Character input while selected. Returns true if the content changed.
    fn on_key_press(&mut self, _c: char) -> bool {
        false
    }

    /// Per-frame update while selected.
    fn tick(&mut self) {}

    /// Pointer entered.
    fn on_hover(&mut self) {}

    /// Pointer left.
    fn on_unhover(&mut self) {}

    /// Gained focus. `pointer` is set when selection came from the mouse.
    fn on_select(&mut self, _pointer: Option<(i32, i32)>, _was_selected: bool) {}

    /// Lost focus.
    fn on_unselect(&mut self) {}

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Clips widget bounds to the drawable area. Returns `None` when nothing is visible.
#[must_use]
pub fn clip(bounds: Bounds, area: Rect) -> Option<Rect> {
    let left = bounds.x.max(i32::from(area.x));
    let top = bounds.y.max(i32::from(area.y));
    let right = (bounds.x + bounds.width).min(i32::from(area.right()));
    let bottom = (bounds.y + bounds.height).min(i32::from(area.bottom()));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        u16::try_from(left).ok()?,
        u16::try_from(top).ok()?,
        u16::try_from(right - left).ok()?,
        u16::try_from(bottom - top).ok()?,
    ))
}

/// Implements the downcast hooks of [`Widget`].
macro_rules! widget_any {
    () => {
        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}

pub(crate) use widget_any;
