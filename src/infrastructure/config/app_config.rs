//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

const APP_NAME: &str = "cubelaunch";
const APP_QUALIFIER: &str = "net";
const APP_ORGANIZATION: &str = "classicube";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Launcher configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Milliseconds between UI ticks.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Base URL of the account and server list service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL game builds are downloaded from.
    #[serde(default = "default_update_base_url")]
    pub update_base_url: String,

    /// Game client executable.
    #[serde(default = "default_game_executable")]
    pub game_executable: PathBuf,

    /// Directory holding `options.txt` and downloaded resources.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Quit the launcher once the game has started.
    #[serde(default)]
    pub close_on_launch: bool,

    /// Check for newer builds when the main screen opens.
    #[serde(default = "default_true")]
    pub check_updates_on_start: bool,
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    50
}

fn default_api_base_url() -> String {
    "https://www.classicube.net".to_string()
}

fn default_update_base_url() -> String {
    "https://cdn.classicube.net/client".to_string()
}

fn default_game_executable() -> PathBuf {
    PathBuf::from(if cfg!(windows) {
        "ClassiCube.exe"
    } else {
        "ClassiCube"
    })
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(tick_rate_ms) = args.tick_rate_ms {
            self.tick_rate_ms = tick_rate_ms;
        }
        if let Some(api_base_url) = args.api_base_url {
            self.api_base_url = api_base_url;
        }
        if let Some(game_executable) = args.game_executable {
            self.game_executable = game_executable;
        }
        if let Some(data_dir) = args.data_dir {
            self.data_dir = Some(data_dir);
        }
        if let Some(close_on_launch) = args.close_on_launch {
            self.close_on_launch = close_on_launch;
        }
        if let Some(check_updates) = args.check_updates_on_start {
            self.check_updates_on_start = check_updates;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("cubelaunch.log"))
    }

    /// Returns default data directory.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective data directory, falling back to the working directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(Self::default_data_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the tick interval.
    #[must_use]
    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            mouse: true,
            tick_rate_ms: default_tick_rate(),
            api_base_url: default_api_base_url(),
            update_base_url: default_update_base_url(),
            game_executable: default_game_executable(),
            data_dir: None,
            close_on_launch: false,
            check_updates_on_start: true,
        }
    }
}
