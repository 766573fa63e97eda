//! Push button widget.

use ratatui::{
    buffer::Buffer,
    layout::Alignment,
    widgets::{Block, Borders, Paragraph, Widget as _},
};

use super::base::{Widget, WidgetBase, clip, widget_any};
use crate::presentation::theme::LauncherTheme;

/// Bordered button with centred text.
#[derive(Debug, Clone)]
pub struct Button {
    base: WidgetBase,
    text: String,
    width: i32,
}

impl Button {
    /// Button height including borders.
    pub const HEIGHT: i32 = 3;

    /// Creates a button of the given width.
    #[must_use]
    pub fn new(text: impl Into<String>, width: i32) -> Self {
        Self {
            base: WidgetBase::new(true),
            text: text.into(),
            width,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> (i32, i32) {
        (self.width, Self::HEIGHT)
    }

    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        let Some(area) = clip(self.base.bounds, buf.area) else {
            return;
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(self.base.selected));
        Paragraph::new(self.text.as_str())
            .alignment(Alignment::Center)
            .style(theme.button(self.base.hovered, self.base.selected))
            .block(block)
            .render(area, buf);
    }

    widget_any!();
}
