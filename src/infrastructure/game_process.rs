//! Game client process launcher.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::domain::entities::GameArgs;
use crate::domain::errors::LaunchError;
use crate::domain::ports::GamePort;

/// Starts the game executable as a detached child process.
#[derive(Debug, Clone)]
pub struct ProcessGameLauncher {
    executable: PathBuf,
    working_dir: PathBuf,
}

impl ProcessGameLauncher {
    /// Creates launcher for an executable, run from `working_dir`.
    #[must_use]
    pub const fn new(executable: PathBuf, working_dir: PathBuf) -> Self {
        Self {
            executable,
            working_dir,
        }
    }

    fn resolved_executable(&self) -> PathBuf {
        if self.executable.is_absolute() || self.executable.components().count() > 1 {
            return self.executable.clone();
        }
        let local = self.working_dir.join(&self.executable);
        if local.exists() {
            local
        } else {
            self.executable.clone()
        }
    }
}

/// Command line arguments the game client expects.
#[must_use]
pub fn command_args(args: &GameArgs) -> Vec<String> {
    if args.is_singleplayer() {
        return vec![args.user.clone()];
    }
    vec![
        args.user.clone(),
        args.mppass.clone(),
        args.ip.clone(),
        args.port.clone(),
    ]
}

impl GamePort for ProcessGameLauncher {
    fn start_game(&self, args: &GameArgs) -> Result<(), LaunchError> {
        let executable = self.resolved_executable();
        if executable.is_absolute() && !executable.exists() {
            return Err(LaunchError::ExecutableMissing {
                path: executable.display().to_string(),
            });
        }

        debug!(path = %executable.display(), ?args, "Spawning game");
        let child = Command::new(&executable)
            .args(command_args(args))
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        info!(pid = child.id(), "Game started");
        Ok(())
    }
}
