//! Prompt to download missing game resources.

use tracing::info;

use super::context::LauncherContext;
use super::registry::ScreenAction;
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::application::tasks::{Progress, TaskPoll};
use crate::domain::Placement;
use crate::domain::entities::total_megabytes;
use crate::domain::errors::TaskError;
use crate::presentation::widgets::{Button, Label, LabelTone, Slider};

/// Click actions of the resources prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourcesAction {
    /// Start the download.
    Yes,
    /// Skip downloading.
    No,
    /// Stop waiting for the download.
    Cancel,
}

/// Download prompt, then progress.
pub struct ResourcesScreen {
    widgets: WidgetSet<ResourcesAction>,
    question: [WidgetId; 2],
    status: WidgetId,
    yes: WidgetId,
    no: WidgetId,
    cancel: WidgetId,
    progress: WidgetId,
}

impl ResourcesScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let question = [
            widgets.add(
                Label::new("Some required resources weren't found"),
                Placement::centre(0, -5),
            ),
            widgets.add(Label::new("Okay to download?"), Placement::centre(0, -3)),
        ];
        let status = widgets.add(Label::new("").tone(LabelTone::Muted), Placement::centre(0, 0));
        let yes = widgets.add_clickable(
            Button::new("Yes", 9),
            Placement::centre(-7, 4),
            ResourcesAction::Yes,
        );
        let no = widgets.add_clickable(
            Button::new("No", 9),
            Placement::centre(7, 4),
            ResourcesAction::No,
        );
        let cancel = widgets.add_clickable(
            Button::new("Cancel", 15),
            Placement::centre(0, 4),
            ResourcesAction::Cancel,
        );
        let progress = widgets.add(Slider::new(25), Placement::centre(0, 2));

        Self {
            widgets,
            question,
            status,
            yes,
            no,
            cancel,
            progress,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: LabelTone) {
        self.widgets.set_label(self.status, text, tone);
    }

    fn show_downloading(&mut self, downloading: bool) {
        for id in [self.question[0], self.question[1], self.yes, self.no] {
            self.widgets.set_hidden(id, downloading);
        }
        self.widgets.set_hidden(self.cancel, !downloading);
        self.widgets.set_hidden(self.progress, !downloading);
    }

    fn download(&mut self, ctx: &mut LauncherContext) {
        if ctx.tasks.fetch_resources.is_working() {
            return;
        }
        ctx.tasks
            .run_fetch_resources(ctx.resources.clone(), ctx.settings.data_dir.clone());
        self.show_downloading(true);
        self.widgets.clear_selection();
    }

    fn show_progress(&mut self, progress: &Progress) {
        self.set_status(
            format!(
                "Fetching {}.. ({}/{})",
                progress.item,
                progress.index + 1,
                progress.total
            ),
            LabelTone::Muted,
        );
        if let Some(percent) = progress.percent
            && let Some(slider) = self.widgets.get_mut::<Slider>(self.progress)
        {
            slider.set_value(percent);
        }
    }
}

impl Default for ResourcesScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Status text for a failed download.
fn describe_download_error(error: &TaskError) -> String {
    match error {
        TaskError::Status { status } => format!("{status} error when downloading resources"),
        other => format!("Error {other} when downloading resources"),
    }
}

impl Screen for ResourcesScreen {
    type Action = ResourcesAction;

    fn widgets(&self) -> &WidgetSet<ResourcesAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<ResourcesAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.yes);
        let downloading = ctx.tasks.fetch_resources.is_working();
        self.show_downloading(downloading);
        if !downloading {
            let size = total_megabytes(&ctx.resources);
            self.set_status(format!("Download size: {size:.2} megabytes"), LabelTone::Muted);
        }
    }

    fn tick(&mut self, ctx: &mut LauncherContext) -> ScreenAction {
        self.widgets.tick();
        if let Some(progress) = ctx.tasks.fetch_resources.progress() {
            self.show_progress(&progress);
        }
        match ctx.tasks.fetch_resources.poll() {
            TaskPoll::Succeeded => {
                info!(count = ctx.resources.len(), "Resources downloaded");
                ctx.resources.clear();
                ScreenAction::Navigate(ctx.after_resources())
            }
            TaskPoll::Failed(e) => {
                self.set_status(describe_download_error(&e), LabelTone::Error);
                ScreenAction::None
            }
            TaskPoll::Idle | TaskPoll::Pending => ScreenAction::None,
        }
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: ResourcesAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            ResourcesAction::Yes => {
                self.download(ctx);
                ScreenAction::None
            }
            ResourcesAction::No | ResourcesAction::Cancel => {
                ScreenAction::Navigate(ctx.after_resources())
            }
        }
    }
}
