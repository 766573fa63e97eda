//! UI screens.

mod app;
mod choose_mode_screen;
mod colours_screen;
/// State shared by every screen.
pub mod context;
mod direct_connect_screen;
mod main_screen;
/// Screen identities and switching.
pub mod registry;
mod resources_screen;
/// Screen trait and widget bookkeeping.
pub mod screen;
mod servers_screen;
mod settings_screen;
mod updates_screen;

pub use app::App;
pub use choose_mode_screen::{ChooseModeAction, ChooseModeScreen};
pub use colours_screen::{ColoursAction, ColoursScreen};
pub use context::{LauncherContext, LauncherSettings};
pub use direct_connect_screen::{DirectConnectAction, DirectConnectScreen};
pub use main_screen::{MainAction, MainScreen};
pub use registry::{ScreenAction, ScreenId, ScreenRegistry};
pub use resources_screen::{ResourcesAction, ResourcesScreen};
pub use screen::{ActiveScreen, Screen, WidgetId, WidgetSet};
pub use servers_screen::{ServersAction, ServersScreen};
pub use settings_screen::{SettingsAction, SettingsScreen};
pub use updates_screen::{UpdatesAction, UpdatesScreen};
