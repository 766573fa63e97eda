//! State shared by every screen.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::registry::ScreenId;
use crate::application::tasks::{LauncherTasks, SignInFlow};
use crate::application::use_cases::LaunchGameUseCase;
use crate::domain::entities::{GameArgs, ResourceFile, default_resources, parse_server_hash};
use crate::domain::errors::LaunchError;
use crate::infrastructure::OptionsStore;
use crate::infrastructure::options_store::keys;
use crate::presentation::theme::LauncherTheme;

/// Launcher behaviour taken from the configuration.
#[derive(Debug, Clone)]
pub struct LauncherSettings {
    /// Exit once the game has started.
    pub close_on_launch: bool,
    /// Run the update check when the launcher starts.
    pub check_updates_on_start: bool,
    /// Directory holding `options.txt` and game resources.
    pub data_dir: PathBuf,
    /// Game client executable.
    pub game_executable: PathBuf,
    /// Release the installed client corresponds to.
    pub game_version: String,
}

/// Everything that outlives a single screen.
#[derive(Debug)]
pub struct LauncherContext {
    /// In-flight web operations.
    pub tasks: LauncherTasks,
    /// Token, sign-in and server-list chain.
    pub sign_in: SignInFlow,
    /// Options shared with the game.
    pub options: OptionsStore,
    /// Active colours.
    pub theme: LauncherTheme,
    /// Starts the game client.
    pub launcher: LaunchGameUseCase,
    /// Resources not yet present in the data directory.
    pub resources: Vec<ResourceFile>,
    /// Configured behaviour.
    pub settings: LauncherSettings,
    /// Set when the launcher should quit after this frame.
    pub should_exit: bool,
    /// Set when a downloaded update should be applied on exit.
    pub should_update: bool,
}

impl LauncherContext {
    /// Creates the context, loading the theme from options and looking for missing resources.
    #[must_use]
    pub fn new(
        tasks: LauncherTasks,
        options: OptionsStore,
        launcher: LaunchGameUseCase,
        settings: LauncherSettings,
    ) -> Self {
        let theme = LauncherTheme::load(&options);
        let resources = missing_resources(&settings.data_dir);
        if !resources.is_empty() {
            info!(count = resources.len(), "Resources missing");
        }
        Self {
            tasks,
            sign_in: SignInFlow::new(),
            options,
            theme,
            launcher,
            resources,
            settings,
            should_exit: false,
            should_update: false,
        }
    }

    /// Screen shown first.
    #[must_use]
    pub fn initial_screen(&self) -> ScreenId {
        if !self.resources.is_empty() {
            ScreenId::Resources
        } else if self.options.existed() {
            ScreenId::Main
        } else {
            ScreenId::ChooseMode { first_time: true }
        }
    }

    /// Screen after the resources prompt is done.
    #[must_use]
    pub fn after_resources(&self) -> ScreenId {
        if self.options.existed() {
            ScreenId::Main
        } else {
            ScreenId::ChooseMode { first_time: true }
        }
    }

    /// Whether the classic background option is on.
    #[must_use]
    pub fn classic_background(&self) -> bool {
        self.options.get_bool(keys::CLASSIC_BACKGROUND, false)
    }

    /// Username to join servers with: the signed-in name, else the saved one.
    #[must_use]
    pub fn username(&self) -> String {
        self.tasks.sign_in.value().map_or_else(
            || self.options.get_or_empty(keys::USERNAME).to_string(),
            |signed_in| signed_in.username.clone(),
        )
    }

    /// Starts the game, remembering the session for Resume.
    ///
    /// # Errors
    /// Returns error if the game process cannot be started.
    pub fn start_game(&mut self, args: &GameArgs) -> Result<(), LaunchError> {
        self.launcher.execute(args)?;
        self.options.save_resume(args);
        self.save_options();
        if self.settings.close_on_launch {
            self.should_exit = true;
        }
        Ok(())
    }

    /// Joins a listed server given its hash or play URL.
    ///
    /// # Errors
    /// Returns error if no fetched server matches or the game cannot start.
    pub fn connect_to_server(&mut self, hash_or_url: &str) -> Result<(), LaunchError> {
        let unknown = || LaunchError::UnknownServer {
            hash: hash_or_url.trim().to_string(),
        };
        let hash = parse_server_hash(hash_or_url).ok_or_else(unknown)?;
        let server = self.tasks.server_by_hash(hash).cloned().ok_or_else(unknown)?;
        let args = self.launcher.join_server(&self.username(), &server)?;
        self.options.save_resume(&args);
        self.save_options();
        if self.settings.close_on_launch {
            self.should_exit = true;
        }
        Ok(())
    }

    /// Persists options, logging instead of failing.
    pub fn save_options(&mut self) {
        if let Err(e) = self.options.save() {
            warn!(error = %e, "Failed to save options");
        }
    }

    /// Where a downloaded client build is written before it replaces the current one.
    #[must_use]
    pub fn update_path(&self) -> PathBuf {
        let mut name = self
            .settings
            .game_executable
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".update");
        self.settings.data_dir.join(name)
    }
}

/// Default resources whose files are absent under `data_dir`.
#[must_use]
pub fn missing_resources(data_dir: &Path) -> Vec<ResourceFile> {
    default_resources()
        .into_iter()
        .filter(|file| !data_dir.join(&file.path).exists())
        .collect()
}
