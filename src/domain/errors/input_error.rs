//! User input validation errors.

use thiserror::Error;

/// Problems found in form input before any work is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum InputError {
    #[error("Username required")]
    UsernameRequired,

    #[error("Password required")]
    PasswordRequired,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Invalid ip")]
    InvalidIp,

    #[error("Invalid port")]
    InvalidPort,
}
