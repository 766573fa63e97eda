//! Form input DTOs validated before any work starts.

use std::net::Ipv4Addr;

use crate::domain::entities::GameArgs;
use crate::domain::errors::InputError;

/// Multiplayer pass sent when the user left the field empty.
pub const NO_MPPASS: &str = "(none)";

/// Credentials typed into the main screen.
#[derive(Clone)]
pub struct SignInRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl SignInRequest {
    /// Creates new sign-in request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks both fields are filled in.
    ///
    /// # Errors
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.username.is_empty() {
            return Err(InputError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(InputError::PasswordRequired);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}

/// Fields of the direct connect form.
#[derive(Debug, Clone, Default)]
pub struct DirectConnectRequest {
    /// Player name.
    pub username: String,
    /// `ip:port` text.
    pub address: String,
    /// Multiplayer pass, may be empty.
    pub mppass: String,
}

impl DirectConnectRequest {
    /// Validates the form and builds launch arguments.
    ///
    /// The address is split at its last colon. `localhost` is accepted as an
    /// alias for the loopback address.
    ///
    /// # Errors
    /// Returns the first problem found, address first.
    pub fn into_game_args(self) -> Result<GameArgs, InputError> {
        let (ip, port) = match self.address.rfind(':') {
            Some(index) if index > 0 && index + 1 < self.address.len() => {
                (&self.address[..index], &self.address[index + 1..])
            }
            _ => return Err(InputError::InvalidAddress),
        };
        let ip = if ip == "localhost" { "127.0.0.1" } else { ip };

        if self.username.is_empty() {
            return Err(InputError::UsernameRequired);
        }
        if ip.parse::<Ipv4Addr>().is_err() {
            return Err(InputError::InvalidIp);
        }
        if port.parse::<u16>().is_err() {
            return Err(InputError::InvalidPort);
        }

        let mppass = if self.mppass.is_empty() {
            NO_MPPASS.to_string()
        } else {
            self.mppass
        };

        Ok(GameArgs {
            ip: ip.to_string(),
            port: port.to_string(),
            user: self.username,
            mppass,
            server: String::new(),
        })
    }
}
