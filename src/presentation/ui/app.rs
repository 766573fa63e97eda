//! Main application loop.

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use super::context::LauncherContext;
use super::registry::ScreenRegistry;
use crate::presentation::events::{InputEvent, translate};

/// Window assumed until the terminal reports its size.
const INITIAL_WINDOW: (i32, i32) = (80, 24);

/// Drives the active screen from terminal events and a fixed tick.
pub struct App {
    registry: ScreenRegistry,
    tick_rate: Duration,
}

impl App {
    /// Creates the app showing the context's initial screen.
    #[must_use]
    pub fn new(ctx: LauncherContext, tick_rate: Duration) -> Self {
        Self {
            registry: ScreenRegistry::new(ctx, INITIAL_WINDOW),
            tick_rate,
        }
    }

    /// Screen registry, for inspection.
    #[must_use]
    pub const fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Runs until a screen or the user asks to exit, then hands back the context.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be queried or drawn.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<LauncherContext> {
        let size = terminal.size()?;
        self.registry
            .resize(i32::from(size.width), i32::from(size.height));

        let mut terminal_events = EventStream::new();
        let mut ticker = interval(self.tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.draw(terminal)?;

        while !self.registry.context().should_exit {
            tokio::select! {
                _ = ticker.tick() => {
                    self.registry.tick();
                }

                event = terminal_events.next() => match event {
                    Some(Ok(event)) => self.handle_terminal_event(&event),
                    Some(Err(e)) => warn!(error = %e, "Terminal event error"),
                    None => {
                        info!("Terminal event stream closed");
                        break;
                    }
                },
            }

            self.draw(terminal)?;
        }

        info!(
            update = self.registry.context().should_update,
            "Launcher exiting"
        );
        Ok(self.registry.into_context())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.registry.relayout();
        let registry = &self.registry;
        terminal.draw(|frame| registry.draw(frame.buffer_mut()))?;
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        if let Some(input) = translate(event) {
            self.handle_input(input);
        }
    }

    /// Routes one translated input to the active screen.
    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Quit => {
                debug!("Quit requested");
                self.registry.context_mut().should_exit = true;
            }
            InputEvent::Resize { width, height } => self.registry.resize(width, height),
            InputEvent::KeyDown(key) => self.registry.key_down(key),
            InputEvent::KeyPress(c) => self.registry.key_press(c),
            InputEvent::MouseDown { x, y } => self.registry.mouse_down(x, y),
            InputEvent::MouseUp { x, y } => self.registry.mouse_up(x, y),
            InputEvent::MouseMove { x, y } => self.registry.mouse_move(x, y),
            InputEvent::MouseWheel(delta) => self.registry.mouse_wheel(delta),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("registry", &self.registry)
            .field("tick_rate", &self.tick_rate)
            .finish()
    }
}
