//! Launcher colour editor.

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::domain::{Anchor, Placement};
use crate::presentation::events::LauncherKey;
use crate::presentation::theme::{LauncherTheme, ThemeSlot};
use crate::presentation::widgets::{Button, Label, LabelTone, TextInput};

const CHANNELS: [&str; 3] = ["Red", "Green", "Blue"];
const CHANNEL_COLUMNS: [i32; 3] = [4, 12, 20];
const FIRST_ROW: i32 = -9;
const ROW_HEIGHT: i32 = 3;
/// Inputs come first, so their widget index is `slot * 3 + channel`.
const INPUT_COUNT: usize = ThemeSlot::ALL.len() * 3;

/// Click actions of the colours screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoursAction {
    /// Restore the built-in colours.
    Defaults,
    /// Return to settings.
    Back,
}

/// Grid of RGB inputs, one row per theme slot.
pub struct ColoursScreen {
    widgets: WidgetSet<ColoursAction>,
    inputs: Vec<WidgetId>,
    names: Vec<WidgetId>,
    back: WidgetId,
}

impl ColoursScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let mut inputs = Vec::with_capacity(INPUT_COUNT);
        for row in 0..ThemeSlot::ALL.len() {
            let y = row_offset(row);
            for column in CHANNEL_COLUMNS {
                inputs.push(widgets.add(TextInput::new(7).max_len(3), Placement::centre(column, y)));
            }
        }

        let names = ThemeSlot::ALL
            .iter()
            .map(|slot| widgets.add(Label::new(slot.label()), Placement::default()))
            .collect();
        for (name, column) in CHANNELS.into_iter().zip(CHANNEL_COLUMNS) {
            widgets.add(
                Label::new(name).tone(LabelTone::Muted),
                Placement::centre(column, FIRST_ROW - 2),
            );
        }

        widgets.add_clickable(
            Button::new("Default colours", 20),
            Placement::centre(-8, 7),
            ColoursAction::Defaults,
        );
        let back = widgets.add_clickable(
            Button::new("Back", 10),
            Placement::centre(10, 7),
            ColoursAction::Back,
        );

        Self {
            widgets,
            inputs,
            names,
            back,
        }
    }

    fn show_theme(&mut self, theme: &LauncherTheme) {
        for (slot, ids) in ThemeSlot::ALL.iter().zip(self.inputs.chunks(3)) {
            for (id, value) in ids.iter().zip(theme.get(*slot)) {
                self.widgets.set_input_text(*id, value.to_string());
            }
        }
    }

    fn colour_input(&self, id: WidgetId) -> Option<usize> {
        let index = id.index();
        (index < INPUT_COUNT).then_some(index)
    }

    /// Reparses the triple containing `index` into the theme; ignored while any part is invalid.
    fn apply_row(&self, ctx: &mut LauncherContext, index: usize) {
        let row = index / 3;
        let mut rgb = [0_u8; 3];
        for (channel, value) in rgb.iter_mut().enumerate() {
            match self.widgets.input_text(self.inputs[row * 3 + channel]).parse() {
                Ok(parsed) => *value = parsed,
                Err(_) => return,
            }
        }
        let slot = ThemeSlot::ALL[row];
        if ctx.theme.get(slot) == rgb {
            return;
        }
        ctx.theme.set(slot, rgb);
        ctx.theme.save(&mut ctx.options);
        ctx.save_options();
    }

    fn adjust_selected(&mut self, ctx: &mut LauncherContext, delta: i32) -> bool {
        let Some(id) = self.widgets.selected() else {
            return false;
        };
        let Some(index) = self.colour_input(id) else {
            return false;
        };
        let Ok(current) = self.widgets.input_text(id).parse::<u8>() else {
            return true;
        };
        let next = (i32::from(current) + delta).clamp(0, 255);
        self.widgets.set_input_text(id, next.to_string());
        self.apply_row(ctx, index);
        true
    }
}

impl Default for ColoursScreen {
    fn default() -> Self {
        Self::new()
    }
}

const fn row_offset(row: usize) -> i32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let row = row as i32;
    FIRST_ROW + row * ROW_HEIGHT
}

impl Screen for ColoursScreen {
    type Action = ColoursAction;

    fn widgets(&self) -> &WidgetSet<ColoursAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<ColoursAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.back);
        self.show_theme(&ctx.theme);
    }

    fn reposition(&mut self, window: (i32, i32)) {
        let left = window.0 / 2 - 20;
        for (row, name) in self.names.iter().enumerate() {
            self.widgets.set_location(
                *name,
                Placement::new(Anchor::Min, Anchor::Centre, left, row_offset(row)),
            );
        }
        self.widgets.relayout(window);
    }

    fn key_down(&mut self, ctx: &mut LauncherContext, key: LauncherKey) -> ScreenAction {
        let delta = match key {
            LauncherKey::Left => Some(-1),
            LauncherKey::Right => Some(1),
            LauncherKey::Up => Some(10),
            LauncherKey::Down => Some(-10),
            _ => None,
        };
        if let Some(delta) = delta
            && self.adjust_selected(ctx, delta)
        {
            return ScreenAction::None;
        }
        let dispatch = self.widgets.key_down(key);
        self.route(ctx, dispatch)
    }

    fn mouse_wheel(&mut self, ctx: &mut LauncherContext, delta: i32) -> ScreenAction {
        self.adjust_selected(ctx, delta);
        ScreenAction::None
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: ColoursAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            ColoursAction::Defaults => {
                ctx.theme = LauncherTheme::default();
                ctx.theme.save(&mut ctx.options);
                ctx.save_options();
                self.show_theme(&ctx.theme);
                ScreenAction::None
            }
            ColoursAction::Back => ScreenAction::Navigate(ScreenId::Settings),
        }
    }

    fn text_changed(&mut self, ctx: &mut LauncherContext, id: WidgetId) -> ScreenAction {
        if let Some(index) = self.colour_input(id) {
            self.apply_row(ctx, index);
        }
        ScreenAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ui::context::test_support::{harness, open};
    use tempfile::TempDir;
    use test_case::test_case;

    fn select_input(screen: &mut ColoursScreen, ctx: &mut LauncherContext, index: usize) {
        let bounds = screen.widgets.widget(screen.inputs[index]).unwrap().base().bounds;
        screen.mouse_down(ctx, bounds.x + 1, bounds.y + 1);
        screen.mouse_up(ctx, bounds.x + 1, bounds.y + 1);
        assert_eq!(screen.widgets.selected(), Some(screen.inputs[index]));
    }

    #[test]
    fn test_init_shows_theme() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);

        let background = LauncherTheme::default().get(ThemeSlot::Background);
        assert_eq!(screen.widgets.input_text(screen.inputs[0]), background[0].to_string());
        assert_eq!(screen.widgets.input_text(screen.inputs[2]), background[2].to_string());
    }

    #[test]
    fn test_typing_updates_row() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);

        // Green of the button border row.
        select_input(&mut screen, &mut h.ctx, 4);
        screen.key_down(&mut h.ctx, LauncherKey::End);
        for _ in 0..3 {
            screen.key_down(&mut h.ctx, LauncherKey::Backspace);
        }
        for c in "12".chars() {
            screen.key_press(&mut h.ctx, c);
        }

        let border = h.ctx.theme.get(ThemeSlot::ButtonBorder);
        assert_eq!(border[1], 12);
        assert_eq!(h.ctx.options.get_colour(ThemeSlot::ButtonBorder.option_key()), Some(border));
    }

    #[test]
    fn test_invalid_text_leaves_theme() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);
        let before = h.ctx.theme.get(ThemeSlot::Background);

        screen.widgets.set_input_text(screen.inputs[0], "999");
        screen.text_changed(&mut h.ctx, screen.inputs[0]);
        assert_eq!(h.ctx.theme.get(ThemeSlot::Background), before);
    }

    #[test_case(LauncherKey::Left, 99 ; "left")]
    #[test_case(LauncherKey::Right, 101 ; "right")]
    #[test_case(LauncherKey::Up, 110 ; "up")]
    #[test_case(LauncherKey::Down, 90 ; "down")]
    fn test_arrow_keys_adjust(key: LauncherKey, expected: u8) {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);

        screen.widgets.set_input_text(screen.inputs[6], "100");
        select_input(&mut screen, &mut h.ctx, 6);
        screen.key_down(&mut h.ctx, key);
        assert_eq!(screen.widgets.input_text(screen.inputs[6]), expected.to_string());
        assert_eq!(h.ctx.theme.get(ThemeSlot::ButtonHighlight)[0], expected);
    }

    #[test_case("250", 10, "255" ; "clamps high")]
    #[test_case("5", -10, "0" ; "clamps low")]
    fn test_wheel_clamps(start: &str, delta: i32, expected: &str) {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);

        screen.widgets.set_input_text(screen.inputs[14], start);
        select_input(&mut screen, &mut h.ctx, 14);
        screen.mouse_wheel(&mut h.ctx, delta);
        assert_eq!(screen.widgets.input_text(screen.inputs[14]), expected);
    }

    #[test]
    fn test_arrows_without_colour_input_fall_through() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);
        let before = h.ctx.theme;

        screen.key_down(&mut h.ctx, LauncherKey::Up);
        assert_eq!(h.ctx.theme, before);
    }

    #[test]
    fn test_defaults_restore_theme() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.ctx.theme.set(ThemeSlot::Background, [1, 2, 3]);
        let mut screen = ColoursScreen::new();
        open(&mut screen, &mut h.ctx);
        assert_eq!(screen.widgets.input_text(screen.inputs[0]), "1");

        screen.handle_click(&mut h.ctx, ColoursAction::Defaults, 0, 0);
        assert_eq!(h.ctx.theme, LauncherTheme::default());
        assert_eq!(
            screen.widgets.input_text(screen.inputs[0]),
            LauncherTheme::default().get(ThemeSlot::Background)[0].to_string()
        );
    }
}
