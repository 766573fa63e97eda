//! Infrastructure layer with external service adapters.

/// classicube.net API client.
pub mod classicube;
/// Application configuration.
pub mod config;
/// Game client process launcher.
pub mod game_process;
/// `options.txt` store.
pub mod options_store;

pub use classicube::ClassiCubeClient;
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use game_process::ProcessGameLauncher;
pub use options_store::OptionsStore;
