//! Game launch error types.

use thiserror::Error;

/// Game process launch failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum LaunchError {
    #[error("game executable not found at {path}")]
    ExecutableMissing { path: String },

    #[error("failed to start game: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("no server matches hash {hash}")]
    UnknownServer { hash: String },
}
