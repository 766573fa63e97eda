use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line flags; every flag overrides the matching `config.toml` value.
#[derive(Debug, Parser)]
#[command(
    name = "cubelaunch",
    version,
    about = "A lightweight terminal launcher for ClassiCube",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Milliseconds between UI ticks.
    #[arg(long, value_name = "MS")]
    pub tick_rate_ms: Option<u64>,

    /// Base URL of the account service.
    #[arg(long, value_name = "URL", env = "CUBELAUNCH_API_URL")]
    pub api_base_url: Option<String>,

    /// Game client executable.
    #[arg(long, value_name = "PATH")]
    pub game_executable: Option<PathBuf>,

    /// Directory holding options and resources.
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Quit the launcher once the game has started.
    #[arg(long)]
    pub close_on_launch: Option<bool>,

    /// Check for newer builds on start.
    #[arg(long)]
    pub check_updates_on_start: Option<bool>,
}
