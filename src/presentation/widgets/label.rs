//! Static text widget.

use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget as _},
};
use unicode_width::UnicodeWidthStr;

use super::base::{Widget, WidgetBase, clip, widget_any};
use crate::presentation::theme::LauncherTheme;

/// Label emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelTone {
    /// Plain text.
    #[default]
    Normal,
    /// Titles.
    Title,
    /// Secondary descriptions.
    Muted,
    /// Problems reported to the user.
    Error,
}

impl LabelTone {
    /// Returns style for tone.
    #[must_use]
    pub fn style(self) -> Style {
        match self {
            Self::Normal => Style::default().fg(Color::White),
            Self::Title => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Self::Muted => Style::default().fg(Color::Gray),
            Self::Error => Style::default().fg(Color::LightRed),
        }
    }
}

/// Single-line text. Never takes focus.
#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    text: String,
    tone: LabelTone,
}

impl Label {
    /// Creates a label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(false),
            text: text.into(),
            tone: LabelTone::Normal,
        }
    }

    /// Sets tone.
    #[must_use]
    pub const fn tone(mut self, tone: LabelTone) -> Self {
        self.tone = tone;
        self
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

    /// Changes tone.
    pub const fn set_tone(&mut self, tone: LabelTone) {
        self.tone = tone;
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> (i32, i32) {
        let width = i32::try_from(self.text.width()).unwrap_or(i32::MAX);
        (width, 1)
    }

    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        let Some(area) = clip(self.base.bounds, buf.area) else {
            return;
        };
        Paragraph::new(self.text.as_str())
            .style(theme.background().patch(self.tone.style()))
            .render(area, buf);
    }

    widget_any!();
}
