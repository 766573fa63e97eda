//! Game launch use case implementation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::{GameArgs, ServerInfo};
use crate::domain::errors::LaunchError;
use crate::domain::ports::GamePort;

/// Starts the game client for a server or singleplayer.
#[derive(Clone)]
pub struct LaunchGameUseCase {
    game_port: Arc<dyn GamePort>,
}

impl LaunchGameUseCase {
    /// Creates new launch use case.
    #[must_use]
    pub const fn new(game_port: Arc<dyn GamePort>) -> Self {
        Self { game_port }
    }

    /// Starts the game with prepared arguments.
    ///
    /// # Errors
    /// Returns error if the process cannot be started.
    pub fn execute(&self, args: &GameArgs) -> Result<(), LaunchError> {
        if args.is_singleplayer() {
            info!(user = %args.user, "Starting singleplayer");
        } else {
            info!(user = %args.user, ip = %args.ip, port = %args.port, "Joining server");
        }

        self.game_port.start_game(args).map_err(|e| {
            warn!(error = %e, "Game failed to start");
            e
        })
    }

    /// Joins a server from the fetched list.
    ///
    /// # Errors
    /// Returns error if the process cannot be started.
    pub fn join_server(&self, user: &str, server: &ServerInfo) -> Result<GameArgs, LaunchError> {
        let args = GameArgs {
            user: user.to_string(),
            mppass: server.mppass.clone(),
            ip: server.ip.clone(),
            port: server.port.to_string(),
            server: server.hash.clone(),
        };
        self.execute(&args)?;
        Ok(args)
    }
}

impl std::fmt::Debug for LaunchGameUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchGameUseCase").finish_non_exhaustive()
    }
}
