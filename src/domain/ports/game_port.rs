//! Game process port definition.

use crate::domain::entities::GameArgs;
use crate::domain::errors::LaunchError;

/// Port for starting the game client.
pub trait GamePort: Send + Sync {
    /// Starts the game with the given session arguments.
    ///
    /// # Errors
    /// Returns error if the game process cannot be started.
    fn start_game(&self, args: &GameArgs) -> Result<(), LaunchError>;
}
