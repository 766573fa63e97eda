//! Text input widget.

use ratatui::{
    buffer::Buffer,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget as _},
};

use super::base::{Widget, WidgetBase, clip, widget_any};
use crate::presentation::events::LauncherKey;
use crate::presentation::theme::LauncherTheme;

const BLINK_TICKS: u8 = 10;

/// Single-line editable text field.
#[derive(Debug, Clone)]
pub struct TextInput {
    base: WidgetBase,
    value: String,
    /// Caret position in chars.
    caret: usize,
    masked: bool,
    hint: String,
    max_len: usize,
    width: i32,
    caret_shown: bool,
    blink: u8,
}

impl TextInput {
    /// Input height including borders.
    pub const HEIGHT: i32 = 3;

    /// Creates an input of the given width.
    #[must_use]
    pub fn new(width: i32) -> Self {
        Self {
            base: WidgetBase::new(true),
            value: String::new(),
            caret: 0,
            masked: false,
            hint: String::new(),
            max_len: 64,
            width,
            caret_shown: false,
            blink: 0,
        }
    }

    /// Enables password masking.
    #[must_use]
    pub const fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Sets hint text shown while empty.
    #[must_use]
    pub fn hint(mut self, text: impl Into<String>) -> Self {
        self.hint = text.into();
        self
    }

    /// Limits the number of characters.
    #[must_use]
    pub const fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets value and moves the caret to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into().chars().take(self.max_len).collect();
        self.caret = self.char_count();
    }

    /// Clears value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.caret = 0;
    }

    /// Caret position in chars.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, caret: usize) -> usize {
        self.value
            .char_indices()
            .nth(caret)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Inserts character at caret. Returns false when full.
    pub fn input_char(&mut self, c: char) -> bool {
        if c.is_control() || self.char_count() >= self.max_len {
            return false;
        }
        let at = self.byte_index(self.caret);
        self.value.insert(at, c);
        self.caret += 1;
        true
    }

    /// Deletes character before caret.
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        let at = self.byte_index(self.caret);
        self.value.remove(at);
        true
    }

    /// Deletes character at caret.
    pub fn delete(&mut self) -> bool {
        if self.caret >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.caret);
        self.value.remove(at);
        true
    }

    fn show_caret(&mut self) {
        self.caret_shown = true;
        self.blink = 0;
    }

    fn display_text(&self) -> String {
        if self.masked {
            "*".repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }

    fn inner_width(&self) -> usize {
        usize::try_from(self.width - 2).unwrap_or(0)
    }

    /// First visible char, keeping the caret inside the field.
    fn scroll(&self) -> usize {
        let inner = self.inner_width();
        if inner == 0 {
            return 0;
        }
        (self.caret + 1).saturating_sub(inner)
    }
}

impl Widget for TextInput {
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
        let inner = block.inner(area);
        block.render(area, buf);

        let scroll = self.scroll();
        let paragraph = if self.value.is_empty() {
            Paragraph::new(self.hint.as_str()).style(theme.hint())
        } else {
            let visible: String = self.display_text().chars().skip(scroll).collect();
            Paragraph::new(visible).style(theme.input())
        };
        paragraph.render(inner, buf);

        if self.base.selected && self.caret_shown && inner.width > 0 {
            let offset = u16::try_from(self.caret - scroll).unwrap_or(u16::MAX);
            let caret_x = inner.x.saturating_add(offset);
            if caret_x < inner.right() {
                buf[(caret_x, inner.y)].set_style(Style::default().bg(Color::Black).fg(Color::White));
            }
        }
    }

    fn on_key_down(&mut self, key: LauncherKey) -> bool {
        self.show_caret();
        match key {
            LauncherKey::Backspace => self.backspace(),
            LauncherKey::Delete => self.delete(),
            LauncherKey::Left => {
                self.caret = self.caret.saturating_sub(1);
                false
            }
            LauncherKey::Right => {
                self.caret = (self.caret + 1).min(self.char_count());
                false
            }
            LauncherKey::Home => {
                self.caret = 0;
                false
            }
            LauncherKey::End => {
                self.caret = self.char_count();
                false
            }
            _ => false,
        }
    }

    fn on_key_press(&mut self, c: char) -> bool {
        self.show_caret();
        self.input_char(c)
    }

    fn tick(&mut self) {
        self.blink += 1;
        if self.blink >= BLINK_TICKS {
            self.blink = 0;
            self.caret_shown = !self.caret_shown;
        }
    }

    fn on_select(&mut self, pointer: Option<(i32, i32)>, _was_selected: bool) {
        self.show_caret();
        self.caret = match pointer {
            Some((x, _)) => {
                let column = usize::try_from(x - self.base.bounds.x - 1).unwrap_or(0);
                (column + self.scroll()).min(self.char_count())
            }
            None => self.char_count(),
        };
    }

    fn on_unselect(&mut self) {
        self.caret_shown = false;
    }

    widget_any!();
}
