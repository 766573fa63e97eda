//! Game mode picker.

use tracing::info;

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::domain::entities::GameMode;
use crate::domain::{Anchor, Placement};
use crate::presentation::widgets::{Button, Label, LabelTone};

/// Vertical offset of each mode row from the window centre.
const ROWS: [i32; 3] = [-5, 0, 5];

/// Click actions of the mode picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseModeAction {
    /// Apply a mode and continue.
    Use(GameMode),
    /// Return to settings.
    Back,
}

/// Three mode buttons with two description lines each.
pub struct ChooseModeScreen {
    widgets: WidgetSet<ChooseModeAction>,
    first_time: bool,
    buttons: Vec<WidgetId>,
    descriptions: Vec<[WidgetId; 2]>,
    help: WidgetId,
    back: WidgetId,
}

impl ChooseModeScreen {
    /// Creates the picker. The first-time variant shows help and has no Back.
    #[must_use]
    pub fn new(first_time: bool) -> Self {
        let mut widgets = WidgetSet::new();
        widgets.add(
            Label::new("Choose game mode").tone(LabelTone::Title),
            Placement::centre(1, -9),
        );

        let modes = [
            (
                GameMode::Enhanced,
                "Enhanced",
                [
                    "Enables custom blocks, changing env",
                    "settings, longer messages, and more",
                ],
            ),
            (
                GameMode::ClassicHax,
                "Classic +hax",
                [
                    "Same as Classic mode, except that",
                    "hacks (noclip/fly/speed) are enabled",
                ],
            ),
            (
                GameMode::Classic,
                "Classic",
                [
                    "Only uses blocks and features from",
                    "the original minecraft classic",
                ],
            ),
        ];

        let mut buttons = Vec::with_capacity(modes.len());
        let mut descriptions = Vec::with_capacity(modes.len());
        for ((mode, text, [first, second]), row) in modes.into_iter().zip(ROWS) {
            buttons.push(widgets.add_clickable(
                Button::new(text, 18),
                Placement::centre(-22, row),
                ChooseModeAction::Use(mode),
            ));
            // Placed against the window width in reposition.
            descriptions.push([
                widgets.add(Label::new(first).tone(LabelTone::Muted), Placement::default()),
                widgets.add(Label::new(second).tone(LabelTone::Muted), Placement::default()),
            ]);
        }

        let help = widgets.add(
            Label::new("Click Enhanced if you're not sure which mode to choose."),
            Placement::centre(0, 9),
        );
        let back = widgets.add_clickable(
            Button::new("Back", 10),
            Placement::centre(0, 8),
            ChooseModeAction::Back,
        );

        Self {
            widgets,
            first_time,
            buttons,
            descriptions,
            help,
            back,
        }
    }

    fn apply(ctx: &mut LauncherContext, mode: GameMode) {
        for (key, value) in mode.option_values() {
            ctx.options.set_bool(key, value);
        }
        ctx.save_options();
        info!(?mode, "Game mode chosen");
    }
}

impl Screen for ChooseModeScreen {
    type Action = ChooseModeAction;

    fn widgets(&self) -> &WidgetSet<ChooseModeAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<ChooseModeAction> {
        &mut self.widgets
    }

    fn init(&mut self, _ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.buttons[0]);
        self.widgets.set_hidden(self.help, !self.first_time);
        self.widgets.set_hidden(self.back, self.first_time);
    }

    fn reposition(&mut self, window: (i32, i32)) {
        let left = window.0 / 2 - 2;
        for (lines, row) in self.descriptions.iter().zip(ROWS) {
            self.widgets
                .set_location(lines[0], Placement::new(Anchor::Min, Anchor::Centre, left, row - 1));
            self.widgets
                .set_location(lines[1], Placement::new(Anchor::Min, Anchor::Centre, left, row + 1));
        }
        self.widgets.relayout(window);
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: ChooseModeAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            ChooseModeAction::Use(mode) => {
                Self::apply(ctx, mode);
                ScreenAction::Navigate(ScreenId::Main)
            }
            ChooseModeAction::Back => ScreenAction::Navigate(ScreenId::Settings),
        }
    }
}
