//! Holds the active screen and switches between screens.

use ratatui::buffer::Buffer;
use tracing::info;

use super::choose_mode_screen::ChooseModeScreen;
use super::colours_screen::ColoursScreen;
use super::context::LauncherContext;
use super::direct_connect_screen::DirectConnectScreen;
use super::main_screen::MainScreen;
use super::resources_screen::ResourcesScreen;
use super::screen::ActiveScreen;
use super::servers_screen::ServersScreen;
use super::settings_screen::SettingsScreen;
use super::updates_screen::UpdatesScreen;
use crate::presentation::events::LauncherKey;

/// Every screen the launcher can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Game mode picker.
    ChooseMode {
        /// Shown on first launch: help text visible, no Back button.
        first_time: bool,
    },
    /// Theme colour editor.
    Colours,
    /// Join by address.
    DirectConnect,
    /// Sign-in and quick actions.
    Main,
    /// Missing resource download prompt.
    Resources,
    /// Public server list.
    Servers,
    /// Settings menu.
    Settings,
    /// Client update downloads.
    Updates,
}

/// What a screen hook asks the registry to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    /// Replace the active screen.
    Navigate(ScreenId),
    /// Quit the launcher.
    Exit,
}

/// Builds a fresh screen for an id.
pub type ScreenFactory = Box<dyn Fn(ScreenId) -> Box<dyn ActiveScreen>>;

/// Allocates the screen for `id` with its widgets laid out but not yet initialised.
#[must_use]
pub fn create_screen(id: ScreenId) -> Box<dyn ActiveScreen> {
    match id {
        ScreenId::ChooseMode { first_time } => Box::new(ChooseModeScreen::new(first_time)),
        ScreenId::Colours => Box::new(ColoursScreen::new()),
        ScreenId::DirectConnect => Box::new(DirectConnectScreen::new()),
        ScreenId::Main => Box::new(MainScreen::new()),
        ScreenId::Resources => Box::new(ResourcesScreen::new()),
        ScreenId::Servers => Box::new(ServersScreen::new()),
        ScreenId::Settings => Box::new(SettingsScreen::new()),
        ScreenId::Updates => Box::new(UpdatesScreen::new()),
    }
}

/// Single active screen plus the shared context.
pub struct ScreenRegistry {
    active: Box<dyn ActiveScreen>,
    active_id: ScreenId,
    ctx: LauncherContext,
    window: (i32, i32),
    factory: ScreenFactory,
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("active_id", &self.active_id)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl ScreenRegistry {
    /// Creates the registry showing the context's initial screen.
    #[must_use]
    pub fn new(ctx: LauncherContext, window: (i32, i32)) -> Self {
        Self::with_factory(ctx, window, Box::new(create_screen))
    }

    /// Creates the registry with a custom screen constructor.
    #[must_use]
    pub fn with_factory(
        mut ctx: LauncherContext,
        window: (i32, i32),
        factory: ScreenFactory,
    ) -> Self {
        let first = ctx.initial_screen();
        let mut active = factory(first);
        active.reset();
        active.init(&mut ctx);
        active.reposition(window);
        info!(screen = ?first, "Initial screen");
        Self {
            active,
            active_id: first,
            ctx,
            window,
            factory,
        }
    }

    /// Currently shown screen.
    #[must_use]
    pub const fn active_id(&self) -> ScreenId {
        self.active_id
    }

    /// Shared context.
    #[must_use]
    pub const fn context(&self) -> &LauncherContext {
        &self.ctx
    }

    /// Shared context, mutably.
    pub const fn context_mut(&mut self) -> &mut LauncherContext {
        &mut self.ctx
    }

    /// Consumes the registry, returning the context.
    #[must_use]
    pub fn into_context(self) -> LauncherContext {
        self.ctx
    }

    /// Replaces the active screen: the old one is freed before the new one initialises.
    pub fn set_active(&mut self, id: ScreenId) {
        self.active.free(&mut self.ctx);
        let mut next = (self.factory)(id);
        next.reset();
        next.init(&mut self.ctx);
        next.reposition(self.window);
        info!(from = ?self.active_id, to = ?id, "Screen changed");
        self.active = next;
        self.active_id = id;
    }

    /// Applies a hook's result.
    pub fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(id) => self.set_active(id),
            ScreenAction::Exit => self.ctx.should_exit = true,
        }
    }

    /// Window resized.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.window = (width, height);
        self.active.reposition(self.window);
    }

    /// Recomputes layout; widget text may have changed size since the last frame.
    pub fn relayout(&mut self) {
        self.active.reposition(self.window);
    }

    /// Draws the active screen.
    pub fn draw(&self, buf: &mut Buffer) {
        self.active.draw(buf, &self.ctx.theme);
    }

    /// Per-frame update.
    pub fn tick(&mut self) {
        let action = self.active.tick(&mut self.ctx);
        self.apply(action);
    }

    /// Special key.
    pub fn key_down(&mut self, key: LauncherKey) {
        let action = self.active.key_down(&mut self.ctx, key);
        self.apply(action);
    }

    /// Character input.
    pub fn key_press(&mut self, c: char) {
        let action = self.active.key_press(&mut self.ctx, c);
        self.apply(action);
    }

    /// Button pressed.
    pub fn mouse_down(&mut self, x: i32, y: i32) {
        let action = self.active.mouse_down(&mut self.ctx, x, y);
        self.apply(action);
    }

    /// Button released.
    pub fn mouse_up(&mut self, x: i32, y: i32) {
        let action = self.active.mouse_up(&mut self.ctx, x, y);
        self.apply(action);
    }

    /// Pointer moved.
    pub fn mouse_move(&mut self, x: i32, y: i32) {
        let action = self.active.mouse_move(&mut self.ctx, x, y);
        self.apply(action);
    }

    /// Wheel scrolled.
    pub fn mouse_wheel(&mut self, delta: i32) {
        let action = self.active.mouse_wheel(&mut self.ctx, delta);
        self.apply(action);
    }
}
