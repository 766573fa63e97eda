//! Main screen: sign in and quick actions.

use tracing::{debug, warn};

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{HoverChange, Screen, WidgetId, WidgetSet};
use crate::application::dto::SignInRequest;
use crate::application::tasks::{FETCHING_SERVERS, FlowEvent, SIGNING_IN, SignInStage};
use crate::domain::entities::GameArgs;
use crate::domain::{Anchor, Placement};
use crate::infrastructure::options_store::keys;
use crate::presentation::widgets::{Button, Label, LabelTone, TextInput};

/// Click actions of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    /// Validate credentials and start the sign-in chain.
    SignIn,
    /// Rejoin the last server.
    Resume,
    /// Open the direct connect screen.
    DirectConnect,
    /// Start the game offline.
    Singleplayer,
    /// Open settings.
    Options,
}

/// Main screen widgets.
pub struct MainScreen {
    widgets: WidgetSet<MainAction>,
    username: WidgetId,
    password: WidgetId,
    sign_in: WidgetId,
    resume: WidgetId,
    status: WidgetId,
    update: WidgetId,
}

impl MainScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let username = widgets.add(
            TextInput::new(32).hint("Username.."),
            Placement::centre(0, -8),
        );
        let password = widgets.add(
            TextInput::new(32).password().hint("Password.."),
            Placement::centre(0, -5),
        );
        let sign_in = widgets.add_clickable(
            Button::new("Sign in", 12),
            Placement::centre(-11, -2),
            MainAction::SignIn,
        );
        let status = widgets.add(Label::new(""), Placement::centre(0, 0));
        let resume = widgets.add_clickable(
            Button::new("Resume", 12),
            Placement::centre(11, -2),
            MainAction::Resume,
        );
        widgets.add_clickable(
            Button::new("Direct connect", 24),
            Placement::centre(0, 2),
            MainAction::DirectConnect,
        );
        widgets.add_clickable(
            Button::new("Singleplayer", 24),
            Placement::centre(0, 5),
            MainAction::Singleplayer,
        );
        let update = widgets.add(
            Label::new("").tone(LabelTone::Muted),
            Placement::new(Anchor::Max, Anchor::Max, 2, 4),
        );
        widgets.add_clickable(
            Button::new("Options", 12),
            Placement::new(Anchor::Max, Anchor::Max, 1, 1),
            MainAction::Options,
        );

        Self {
            widgets,
            username,
            password,
            sign_in,
            resume,
            status,
            update,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: LabelTone) {
        self.widgets.set_label(self.status, text, tone);
    }

    fn refresh_update_label(&mut self, ctx: &LauncherContext) {
        let task = &ctx.tasks.check_update;
        let (text, tone) = if task.is_working() {
            ("Checking..", LabelTone::Muted)
        } else if let Some(info) = task.value() {
            if info.is_newer_than(&ctx.settings.game_version) {
                ("New release", LabelTone::Title)
            } else {
                ("Up to date", LabelTone::Muted)
            }
        } else if task.error().is_some() {
            ("Check failed", LabelTone::Error)
        } else {
            ("", LabelTone::Muted)
        };
        self.widgets.set_label(self.update, text, tone);
    }

    fn sign_in(&mut self, ctx: &mut LauncherContext) {
        let request = SignInRequest::new(
            self.widgets.input_text(self.username),
            self.widgets.input_text(self.password),
        );
        if let Err(e) = request.validate() {
            self.set_status(e.to_string(), LabelTone::Error);
            return;
        }
        if ctx.tasks.get_token.is_working() {
            return;
        }

        ctx.options.set(keys::USERNAME, request.username.clone());
        ctx.options
            .set_secure(keys::PASSWORD, &request.password, &request.username);
        ctx.save_options();

        if ctx
            .sign_in
            .start(&mut ctx.tasks, &request.username, &request.password)
        {
            self.set_status(SIGNING_IN, LabelTone::Normal);
        }
    }

    fn resume(&mut self, ctx: &mut LauncherContext) {
        let Some(args) = ctx.options.full_resume_info().into_game_args() else {
            debug!("No complete resume info");
            return;
        };
        if let Err(e) = ctx.start_game(&args) {
            self.set_status(e.to_string(), LabelTone::Error);
        }
    }

    fn singleplayer(&mut self, ctx: &mut LauncherContext) {
        let typed = self.widgets.input_text(self.username);
        let user = if typed.is_empty() { "Singleplayer" } else { typed };
        if let Err(e) = ctx.start_game(&GameArgs::singleplayer(user)) {
            self.set_status(e.to_string(), LabelTone::Error);
        }
    }

    fn apply_flow_event(&mut self, ctx: &mut LauncherContext, event: FlowEvent) -> ScreenAction {
        match event {
            FlowEvent::Status(text) => self.set_status(text, LabelTone::Normal),
            FlowEvent::SignedIn { username } => {
                if self.widgets.input_text(self.username) != username {
                    self.widgets.set_input_text(self.username, username.clone());
                    ctx.options.set(keys::USERNAME, username);
                }
                self.set_status(FETCHING_SERVERS, LabelTone::Normal);
            }
            FlowEvent::Failed(message) => self.set_status(message, LabelTone::Error),
            FlowEvent::Finished => return ScreenAction::Navigate(ScreenId::Servers),
        }
        ScreenAction::None
    }
}

impl Default for MainScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainScreen {
    type Action = MainAction;

    fn widgets(&self) -> &WidgetSet<MainAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<MainAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.sign_in);

        let user = ctx.options.get_or_empty(keys::USERNAME).to_string();
        let password = ctx.options.get_secure(keys::PASSWORD, &user).unwrap_or_default();
        self.widgets.set_input_text(self.username, user);
        self.widgets.set_input_text(self.password, password);

        match ctx.sign_in.stage() {
            SignInStage::Idle => {}
            SignInStage::Token | SignInStage::SignIn => {
                self.set_status(SIGNING_IN, LabelTone::Normal);
            }
            SignInStage::Servers => self.set_status(FETCHING_SERVERS, LabelTone::Normal),
        }

        let update = &ctx.tasks.check_update;
        if ctx.settings.check_updates_on_start && !update.is_working() && !update.is_completed() {
            ctx.tasks.run_check_update();
        }
        self.refresh_update_label(ctx);
    }

    fn tick(&mut self, ctx: &mut LauncherContext) -> ScreenAction {
        self.widgets.tick();

        ctx.tasks.check_update.poll();
        self.refresh_update_label(ctx);

        match ctx.sign_in.tick(&mut ctx.tasks) {
            Some(event) => self.apply_flow_event(ctx, event),
            None => ScreenAction::None,
        }
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: MainAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            MainAction::SignIn => self.sign_in(ctx),
            MainAction::Resume => self.resume(ctx),
            MainAction::Singleplayer => self.singleplayer(ctx),
            MainAction::DirectConnect => return ScreenAction::Navigate(ScreenId::DirectConnect),
            MainAction::Options => return ScreenAction::Navigate(ScreenId::Settings),
        }
        ScreenAction::None
    }

    fn hover_changed(&mut self, ctx: &mut LauncherContext, change: HoverChange) -> ScreenAction {
        if ctx.sign_in.is_active() {
            return ScreenAction::None;
        }
        if change.current == Some(self.resume) {
            let typed = self.widgets.input_text(self.username).to_string();
            if let Some(text) = ctx.options.resume_info().describe(&typed) {
                self.set_status(text, LabelTone::Normal);
            }
        } else if change.previous == Some(self.resume) {
            self.set_status("", LabelTone::Normal);
        }
        ScreenAction::None
    }

    fn free(&mut self, ctx: &mut LauncherContext) {
        if ctx.sign_in.is_active() {
            warn!("Leaving main screen while signing in");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskError;
    use crate::domain::entities::UpdateInfo;
    use crate::presentation::events::LauncherKey;
    use crate::presentation::ui::context::test_support::{harness, open, settle};
    use crate::presentation::ui::registry::ScreenRegistry;
    use tempfile::TempDir;

    fn status(screen: &MainScreen) -> String {
        screen
            .widgets
            .get::<Label>(screen.status)
            .map(|l| l.text().to_string())
            .unwrap_or_default()
    }

    fn click(screen: &mut MainScreen, ctx: &mut LauncherContext, action: MainAction) -> ScreenAction {
        screen.handle_click(ctx, action, 0, 0)
    }

    #[test]
    fn test_sign_in_requires_fields() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        click(&mut screen, &mut h.ctx, MainAction::SignIn);
        assert_eq!(status(&screen), "Username required");

        screen.widgets.set_input_text(screen.username, "alice");
        click(&mut screen, &mut h.ctx, MainAction::SignIn);
        assert_eq!(status(&screen), "Password required");
        assert!(!h.ctx.sign_in.is_active());
    }

    #[tokio::test]
    async fn test_sign_in_saves_credentials_and_starts_flow() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        screen.widgets.set_input_text(screen.username, "alice");
        screen.widgets.set_input_text(screen.password, "hunter2");
        click(&mut screen, &mut h.ctx, MainAction::SignIn);

        assert_eq!(status(&screen), SIGNING_IN);
        assert!(h.ctx.sign_in.is_active());
        assert_eq!(h.ctx.options.get(keys::USERNAME), Some("alice"));
        assert_ne!(h.ctx.options.get(keys::PASSWORD), Some("hunter2"));
        assert_eq!(
            h.ctx.options.get_secure(keys::PASSWORD, "alice").as_deref(),
            Some("hunter2")
        );
    }

    #[tokio::test]
    async fn test_init_restores_saved_credentials() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.ctx.options.set(keys::USERNAME, "bob");
        h.ctx.options.set_secure(keys::PASSWORD, "pw", "bob");

        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);
        assert_eq!(screen.widgets.input_text(screen.username), "bob");
        assert_eq!(screen.widgets.input_text(screen.password), "pw");
        assert_eq!(screen.widgets.enter_default(), Some(screen.sign_in));
    }

    #[tokio::test]
    async fn test_failed_sign_in_shows_service_message() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.api.set_sign_in(Err(TaskError::rejected("Wrong username or password")));
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        screen.widgets.set_input_text(screen.username, "alice");
        screen.widgets.set_input_text(screen.password, "nope");
        click(&mut screen, &mut h.ctx, MainAction::SignIn);

        settle(&mut h.ctx, |ctx| {
            screen.tick(ctx);
            !ctx.sign_in.is_active()
        })
        .await;
        assert_eq!(status(&screen), "Wrong username or password");
    }

    #[test]
    fn test_resume_hover_text() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.ctx.options.set(keys::RESUME_USERNAME, "alice");
        h.ctx.options.set(keys::RESUME_SERVER, "Freebuild");
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        let enter = HoverChange {
            previous: None,
            current: Some(screen.resume),
        };
        screen.hover_changed(&mut h.ctx, enter);
        assert_eq!(status(&screen), "Resume as alice to Freebuild");

        screen.widgets.set_input_text(screen.username, "alice");
        screen.hover_changed(&mut h.ctx, enter);
        assert_eq!(status(&screen), "Resume to Freebuild");

        let leave = HoverChange {
            previous: Some(screen.resume),
            current: None,
        };
        screen.hover_changed(&mut h.ctx, leave);
        assert_eq!(status(&screen), "");
    }

    #[test]
    fn test_singleplayer_defaults_username() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        click(&mut screen, &mut h.ctx, MainAction::Singleplayer);
        let launches = h.game.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].user, "Singleplayer");
        assert!(launches[0].is_singleplayer());
    }

    #[test]
    fn test_resume_without_mppass_does_nothing() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.ctx.options.set(keys::RESUME_USERNAME, "alice");
        h.ctx.options.set(keys::RESUME_IP, "10.0.0.1");
        h.ctx.options.set(keys::RESUME_PORT, "25565");
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        click(&mut screen, &mut h.ctx, MainAction::Resume);
        assert!(h.game.launches().is_empty());
    }

    #[tokio::test]
    async fn test_update_label_follows_check() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.api.set_update(Ok(UpdateInfo {
            latest_release: "9.9.9".into(),
            ..UpdateInfo::default()
        }));
        h.ctx.settings.check_updates_on_start = true;
        let mut screen = MainScreen::new();
        open(&mut screen, &mut h.ctx);

        let label = |screen: &MainScreen| {
            screen
                .widgets
                .get::<Label>(screen.update)
                .map(|l| l.text().to_string())
                .unwrap_or_default()
        };
        assert_eq!(label(&screen), "Checking..");
        settle(&mut h.ctx, |ctx| {
            screen.tick(ctx);
            ctx.tasks.check_update.is_completed()
        })
        .await;
        assert_eq!(label(&screen), "New release");
    }

    #[tokio::test]
    async fn test_chain_survives_leaving_and_returning() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        h.ctx.options.set(keys::USERNAME, "alice");
        h.ctx.options.set_secure(keys::PASSWORD, "pw", "alice");
        h.ctx.save_options();
        let mut registry = ScreenRegistry::new(h.ctx, (80, 24));
        assert_eq!(registry.active_id(), ScreenId::Main);

        registry.key_down(LauncherKey::Enter);
        assert!(registry.context().sign_in.is_active());

        registry.set_active(ScreenId::Settings);
        for _ in 0..10 {
            registry.tick();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        assert_eq!(registry.context().sign_in.stage(), SignInStage::Token);

        registry.set_active(ScreenId::Main);
        for _ in 0..100 {
            registry.tick();
            if registry.active_id() == ScreenId::Servers {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        assert_eq!(registry.active_id(), ScreenId::Servers);
        assert!(!registry.context().sign_in.is_active());
    }
}
