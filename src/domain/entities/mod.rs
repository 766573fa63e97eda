//! Domain entity definitions.

mod game_mode;
mod release;
mod resource;
mod server;
mod session;

pub use game_mode::GameMode;
pub use release::{
    BuildChannel, BuildFlavor, BuildTarget, ReleaseVersion, UpdateInfo, describe_age,
};
pub use resource::{ResourceFile, default_resources, total_megabytes};
pub use server::{ServerInfo, parse_server_hash};
pub use session::{GameArgs, ResumeInfo, SignedIn};
