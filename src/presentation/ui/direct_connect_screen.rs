//! Join a server by address.

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::application::dto::DirectConnectRequest;
use crate::domain::Placement;
use crate::infrastructure::options_store::keys;
use crate::presentation::widgets::{Button, Label, LabelTone, TextInput};

/// Click actions of the direct connect screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectConnectAction {
    /// Validate and start the game.
    Connect,
    /// Return to the main screen.
    Back,
}

/// Username, address and mppass form.
pub struct DirectConnectScreen {
    widgets: WidgetSet<DirectConnectAction>,
    username: WidgetId,
    address: WidgetId,
    mppass: WidgetId,
    connect: WidgetId,
    status: WidgetId,
}

impl DirectConnectScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let username = widgets.add(
            TextInput::new(36).hint("Username.."),
            Placement::centre(0, -8),
        );
        let address = widgets.add(
            TextInput::new(36).hint("IP address:Port number.."),
            Placement::centre(0, -5),
        );
        let mppass = widgets.add(
            TextInput::new(36).hint("Mppass.."),
            Placement::centre(0, -2),
        );
        let connect = widgets.add_clickable(
            Button::new("Connect", 14),
            Placement::centre(-9, 1),
            DirectConnectAction::Connect,
        );
        widgets.add_clickable(
            Button::new("Back", 10),
            Placement::centre(11, 1),
            DirectConnectAction::Back,
        );
        let status = widgets.add(Label::new(""), Placement::centre(0, 5));

        Self {
            widgets,
            username,
            address,
            mppass,
            connect,
            status,
        }
    }

    fn connect(&mut self, ctx: &mut LauncherContext) {
        let mppass = self.widgets.input_text(self.mppass).to_string();
        let request = DirectConnectRequest {
            username: self.widgets.input_text(self.username).to_string(),
            address: self.widgets.input_text(self.address).to_string(),
            mppass,
        };
        let args = match request.into_game_args() {
            Ok(args) => args,
            Err(e) => {
                self.widgets.set_label(self.status, e.to_string(), LabelTone::Error);
                return;
            }
        };

        ctx.options.set(keys::DC_USERNAME, args.user.clone());
        ctx.options.set(keys::DC_IP, args.ip.clone());
        ctx.options.set(keys::DC_PORT, args.port.clone());
        ctx.options.set_secure(keys::DC_MPPASS, &args.mppass, &args.user);
        self.widgets.set_label(self.status, "", LabelTone::Normal);

        if let Err(e) = ctx.start_game(&args) {
            self.widgets.set_label(self.status, e.to_string(), LabelTone::Error);
        }
    }
}

impl Default for DirectConnectScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for DirectConnectScreen {
    type Action = DirectConnectAction;

    fn widgets(&self) -> &WidgetSet<DirectConnectAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<DirectConnectAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.connect);

        let user = ctx.options.get_or_empty(keys::DC_USERNAME).to_string();
        let ip = ctx.options.get_or_empty(keys::DC_IP);
        let port = ctx.options.get_or_empty(keys::DC_PORT);
        let address = if ip.is_empty() && port.is_empty() {
            String::new()
        } else {
            format!("{ip}:{port}")
        };
        let mppass = ctx.options.get_secure(keys::DC_MPPASS, &user).unwrap_or_default();

        self.widgets.set_input_text(self.username, user);
        self.widgets.set_input_text(self.address, address);
        self.widgets.set_input_text(self.mppass, mppass);
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: DirectConnectAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            DirectConnectAction::Connect => {
                self.connect(ctx);
                ScreenAction::None
            }
            DirectConnectAction::Back => ScreenAction::Navigate(ScreenId::Main),
        }
    }
}
