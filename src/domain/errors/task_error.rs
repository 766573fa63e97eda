//! Asynchronous task error types.

use thiserror::Error;

/// Failure detail of a completed web task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum TaskError {
    #[error("server returned status {status}")]
    Status { status: u16 },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("{message}")]
    Rejected { message: String },

    #[error("io error: {message}")]
    Io { message: String },

    #[error("task ended without a result")]
    Aborted,
}

impl TaskError {
    /// Creates status error.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates rejection error carrying a service-provided message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates io error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the service rejected the request with a message of its own.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<std::io::Error> for TaskError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}
