//! Port definitions.

mod game_port;
mod launcher_api_port;

pub use game_port::GamePort;
pub use launcher_api_port::LauncherApiPort;
