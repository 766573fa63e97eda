//! Client update downloads.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::application::tasks::TaskPoll;
use crate::domain::Placement;
use crate::domain::entities::{BuildChannel, BuildFlavor, BuildTarget, UpdateInfo, describe_age};
use crate::presentation::widgets::{Button, Label, LabelTone};

const RELEASE_PREFIX: &str = "Latest release: ";
const DEV_PREFIX: &str = "Latest dev build: ";

/// Click actions of the updates screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatesAction {
    /// Download a build.
    Download(BuildTarget),
    /// Return to settings.
    Back,
}

/// Build ages and download buttons for each channel and renderer.
pub struct UpdatesScreen {
    widgets: WidgetSet<UpdatesAction>,
    your_build: WidgetId,
    release: WidgetId,
    dev: WidgetId,
    status: WidgetId,
    back: WidgetId,
    /// Text of the running download, shown with its progress.
    fetching: Option<String>,
}

impl UpdatesScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let your_build = widgets.add(Label::new("Your build: (unknown)"), Placement::centre(0, -9));
        let release = widgets.add(
            Label::new(format!("{RELEASE_PREFIX}Checking..")),
            Placement::centre(0, -7),
        );
        add_download_buttons(&mut widgets, BuildChannel::Release, -4);
        let dev = widgets.add(
            Label::new(format!("{DEV_PREFIX}Checking..")),
            Placement::centre(0, -1),
        );
        add_download_buttons(&mut widgets, BuildChannel::Dev, 2);
        widgets.add(
            Label::new("Direct3D 9 is recommended for Windows").tone(LabelTone::Muted),
            Placement::centre(0, 5),
        );
        let status = widgets.add(Label::new(""), Placement::centre(0, 7));
        let back = widgets.add_clickable(
            Button::new("Back", 10),
            Placement::centre(0, 9),
            UpdatesAction::Back,
        );

        Self {
            widgets,
            your_build,
            release,
            dev,
            status,
            back,
            fetching: None,
        }
    }

    fn show_check_result(&mut self, info: Option<&UpdateInfo>) {
        let now = Utc::now();
        let describe = |prefix: &str, at: Option<DateTime<Utc>>| match at {
            Some(at) => (format!("{prefix}{}", describe_age(now, at)), LabelTone::Normal),
            None => (format!("{prefix}Check failed"), LabelTone::Error),
        };

        let (text, tone) = describe(RELEASE_PREFIX, info.and_then(|i| i.release_at));
        self.widgets.set_label(self.release, text, tone);
        let (text, tone) = describe(DEV_PREFIX, info.and_then(|i| i.dev_at));
        self.widgets.set_label(self.dev, text, tone);
    }

    fn show_your_build(&mut self, ctx: &LauncherContext) {
        let path = &ctx.settings.game_executable;
        let text = match std::fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(modified) => describe_age(Utc::now(), DateTime::<Utc>::from(modified)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read build time");
                "(unknown)".to_string()
            }
        };
        self.widgets
            .set_label(self.your_build, format!("Your build: {text}"), LabelTone::Normal);
    }

    fn download(&mut self, ctx: &mut LauncherContext, target: BuildTarget) {
        let published = ctx
            .tasks
            .check_update
            .value()
            .and_then(|info| info.published(target.channel));
        if published.is_none() || ctx.tasks.fetch_update.is_working() {
            return;
        }

        let fetching = target.fetching_text();
        ctx.tasks.run_fetch_update(target, ctx.update_path());
        self.widgets
            .set_label(self.status, format!("{fetching}.."), LabelTone::Muted);
        self.fetching = Some(fetching);
    }

    fn fetch_tick(&mut self, ctx: &mut LauncherContext) {
        if let (Some(fetching), Some(progress)) =
            (&self.fetching, ctx.tasks.fetch_update.progress())
            && let Some(percent) = progress.percent
        {
            let text = format!("{fetching} {percent}%");
            self.widgets.set_label(self.status, text, LabelTone::Muted);
        }

        match ctx.tasks.fetch_update.poll() {
            TaskPoll::Succeeded => {
                info!(path = %ctx.update_path().display(), "Update downloaded");
                ctx.should_exit = true;
                ctx.should_update = true;
            }
            TaskPoll::Failed(_) => {
                self.widgets
                    .set_label(self.status, "Failed to fetch update", LabelTone::Error);
            }
            TaskPoll::Idle | TaskPoll::Pending => {}
        }
    }
}

impl Default for UpdatesScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn add_download_buttons(widgets: &mut WidgetSet<UpdatesAction>, channel: BuildChannel, row: i32) {
    for (flavor, text, column) in [
        (BuildFlavor::Direct3D9, "Direct3D 9", -9),
        (BuildFlavor::OpenGl, "OpenGL", 9),
    ] {
        widgets.add_clickable(
            Button::new(text, 16),
            Placement::centre(column, row),
            UpdatesAction::Download(BuildTarget { channel, flavor }),
        );
    }
}

impl Screen for UpdatesScreen {
    type Action = UpdatesAction;

    fn widgets(&self) -> &WidgetSet<UpdatesAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<UpdatesAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.back);
        if ctx.tasks.check_update.succeeded() {
            self.show_check_result(ctx.tasks.check_update.value());
        }
        ctx.tasks.run_check_update();
        self.show_your_build(ctx);
    }

    fn tick(&mut self, ctx: &mut LauncherContext) -> ScreenAction {
        self.widgets.tick();
        match ctx.tasks.check_update.poll() {
            TaskPoll::Succeeded | TaskPoll::Failed(_) => {
                self.show_check_result(ctx.tasks.check_update.value());
            }
            TaskPoll::Idle | TaskPoll::Pending => {}
        }
        self.fetch_tick(ctx);
        ScreenAction::None
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: UpdatesAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            UpdatesAction::Download(target) => {
                self.download(ctx, target);
                ScreenAction::None
            }
            UpdatesAction::Back => ScreenAction::Navigate(ScreenId::Settings),
        }
    }
}
