//! Progress bar widget.

use ratatui::{
    buffer::Buffer,
    style::{Color, Style},
    widgets::{Gauge, Widget as _},
};

use super::base::{Widget, WidgetBase, clip, widget_any};
use crate::presentation::theme::{LauncherTheme, ThemeSlot};

/// Horizontal progress bar, 0 to 100.
#[derive(Debug, Clone)]
pub struct Slider {
    base: WidgetBase,
    value: u8,
    width: i32,
}

impl Slider {
    /// Creates an empty slider.
    #[must_use]
    pub const fn new(width: i32) -> Self {
        Self {
            base: WidgetBase::new(false),
            value: 0,
            width,
        }
    }

    /// Current percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Sets percentage, clamped to 100.
    pub fn set_value(&mut self, value: u8) {
        self.value = value.min(100);
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> (i32, i32) {
        (self.width, 1)
    }

    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        let Some(area) = clip(self.base.bounds, buf.area) else {
            return;
        };
        let [r, g, b] = theme.get(ThemeSlot::ButtonForeActive);
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Rgb(r, g, b)))
            .percent(u16::from(self.value))
            .render(area, buf);
    }

    widget_any!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_clamped() {
        let mut slider = Slider::new(30);
        slider.set_value(250);
        assert_eq!(slider.value(), 100);
        slider.set_value(42);
        assert_eq!(slider.value(), 42);
    }
}
