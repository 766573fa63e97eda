//! Settings menu.

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::domain::{Anchor, Placement};
use crate::presentation::widgets::{Button, Label, LabelTone};

/// Rows of the menu, relative to the window centre.
const ROWS: [i32; 3] = [-8, -4, 0];

/// Click actions of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Open client updates.
    Updates,
    /// Open the game mode picker.
    Mode,
    /// Open the colour editor.
    Colours,
    /// Return to the main screen.
    Back,
}

/// Links to the updates, mode and colours screens.
pub struct SettingsScreen {
    widgets: WidgetSet<SettingsAction>,
    labels: [WidgetId; 3],
    colours: WidgetId,
    back: WidgetId,
}

impl SettingsScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let entries = [
            ("Updates", "Get the latest stuff", SettingsAction::Updates),
            ("Mode", "Change the enabled features", SettingsAction::Mode),
            ("Colours", "Change how the launcher looks", SettingsAction::Colours),
        ];

        let mut buttons = Vec::with_capacity(entries.len());
        let mut labels = Vec::with_capacity(entries.len());
        for ((text, description, action), row) in entries.into_iter().zip(ROWS) {
            buttons.push(widgets.add_clickable(
                Button::new(text, 14),
                Placement::centre(-12, row),
                action,
            ));
            labels.push(widgets.add(
                Label::new(description).tone(LabelTone::Muted),
                Placement::centre(0, row),
            ));
        }
        let back = widgets.add_clickable(
            Button::new("Back", 10),
            Placement::centre(0, 8),
            SettingsAction::Back,
        );

        Self {
            widgets,
            labels: [labels[0], labels[1], labels[2]],
            colours: buttons[2],
            back,
        }
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SettingsScreen {
    type Action = SettingsAction;

    fn widgets(&self) -> &WidgetSet<SettingsAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<SettingsAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.back);
        let classic = ctx.classic_background();
        self.widgets.set_hidden(self.colours, classic);
        self.widgets.set_hidden(self.labels[2], classic);
    }

    fn reposition(&mut self, window: (i32, i32)) {
        // Descriptions start just right of the buttons.
        let left = window.0 / 2 - 3;
        for (label, row) in self.labels.into_iter().zip(ROWS) {
            self.widgets
                .set_location(label, Placement::new(Anchor::Min, Anchor::Centre, left, row));
        }
        self.widgets.relayout(window);
    }

    fn handle_click(
        &mut self,
        _ctx: &mut LauncherContext,
        action: SettingsAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        let target = match action {
            SettingsAction::Updates => ScreenId::Updates,
            SettingsAction::Mode => ScreenId::ChooseMode { first_time: false },
            SettingsAction::Colours => ScreenId::Colours,
            SettingsAction::Back => ScreenId::Main,
        };
        ScreenAction::Navigate(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::options_store::keys;
    use crate::presentation::events::LauncherKey;
    use crate::presentation::ui::context::test_support::{harness, open};
    use tempfile::TempDir;
    use test_case::test_case;

    #[test]
    fn test_colours_hidden_with_classic_background() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.ctx.options.set_bool(keys::CLASSIC_BACKGROUND, true);

        let mut screen = SettingsScreen::new();
        open(&mut screen, &mut h.ctx);
        assert!(screen.widgets.is_hidden(screen.colours));
        assert!(screen.widgets.is_hidden(screen.labels[2]));
        assert!(!screen.widgets.is_hidden(screen.labels[0]));
    }

    #[test]
    fn test_colours_shown_by_default() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = SettingsScreen::new();
        open(&mut screen, &mut h.ctx);
        assert!(!screen.widgets.is_hidden(screen.colours));
    }

    #[test_case(SettingsAction::Updates, ScreenId::Updates ; "updates")]
    #[test_case(SettingsAction::Mode, ScreenId::ChooseMode { first_time: false } ; "mode")]
    #[test_case(SettingsAction::Colours, ScreenId::Colours ; "colours")]
    #[test_case(SettingsAction::Back, ScreenId::Main ; "back")]
    fn test_buttons_navigate(action: SettingsAction, expected: ScreenId) {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = SettingsScreen::new();
        open(&mut screen, &mut h.ctx);
        assert_eq!(
            screen.handle_click(&mut h.ctx, action, 0, 0),
            ScreenAction::Navigate(expected)
        );
    }

    #[test]
    fn test_labels_sit_right_of_buttons() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = SettingsScreen::new();
        open(&mut screen, &mut h.ctx);

        let label = screen.widgets.widget(screen.labels[0]).unwrap().base().bounds;
        assert_eq!(label.x, 37);
        assert_eq!(screen.widgets.widget_at(label.x, label.y), Some(screen.labels[0]));
    }

    #[test]
    fn test_enter_goes_back() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = SettingsScreen::new();
        open(&mut screen, &mut h.ctx);
        assert_eq!(
            screen.key_down(&mut h.ctx, LauncherKey::Enter),
            ScreenAction::Navigate(ScreenId::Main)
        );
    }
}
