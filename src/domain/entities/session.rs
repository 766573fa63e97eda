//! Sign-in results and game launch arguments.

use std::fmt;

/// Successful sign-in with the account's canonical username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// Username with the casing the service uses.
    pub username: String,
}

/// Everything the game client needs to join a server.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GameArgs {
    /// Player name.
    pub user: String,
    /// Multiplayer pass, empty for singleplayer.
    pub mppass: String,
    /// Server address, empty for singleplayer.
    pub ip: String,
    /// Server port, empty for singleplayer.
    pub port: String,
    /// Server hash remembered for resuming.
    pub server: String,
}

impl GameArgs {
    /// Creates arguments for a singleplayer session.
    #[must_use]
    pub fn singleplayer(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Self::default()
        }
    }

    /// Returns whether these arguments start singleplayer.
    #[must_use]
    pub fn is_singleplayer(&self) -> bool {
        self.ip.is_empty()
    }
}

impl fmt::Debug for GameArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameArgs")
            .field("user", &self.user)
            .field("mppass", &"<hidden>")
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("server", &self.server)
            .finish()
    }
}

/// Last joined server, remembered for the Resume button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeInfo {
    /// Player name.
    pub user: String,
    /// Server address.
    pub ip: String,
    /// Server port.
    pub port: String,
    /// Server hash, empty for direct connections.
    pub server: String,
    /// Multiplayer pass; only loaded when actually resuming.
    pub mppass: Option<String>,
}

impl ResumeInfo {
    /// Returns whether a full resume is possible.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.user.is_empty()
            && self.mppass.as_deref().is_some_and(|m| !m.is_empty())
            && !self.ip.is_empty()
            && !self.port.is_empty()
    }

    /// Describes the resume target relative to the user currently typed in.
    #[must_use]
    pub fn describe(&self, current_user: &str) -> Option<String> {
        if self.user.is_empty() {
            return None;
        }
        let text = if !self.server.is_empty() && self.user == current_user {
            format!("Resume to {}", self.server)
        } else if !self.server.is_empty() {
            format!("Resume as {} to {}", self.user, self.server)
        } else {
            format!("Resume as {} to {}:{}", self.user, self.ip, self.port)
        };
        Some(text)
    }

    /// Converts into launch arguments when valid.
    #[must_use]
    pub fn into_game_args(self) -> Option<GameArgs> {
        if !self.is_valid() {
            return None;
        }
        Some(GameArgs {
            user: self.user,
            mppass: self.mppass.unwrap_or_default(),
            ip: self.ip,
            port: self.port,
            server: self.server,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(server: &str) -> ResumeInfo {
        ResumeInfo {
            user: "alice".to_string(),
            ip: "10.0.0.1".to_string(),
            port: "25565".to_string(),
            server: server.to_string(),
            mppass: None,
        }
    }

    #[test]
    fn test_describe_variants() {
        assert_eq!(
            resume("Freebuild").describe("alice").as_deref(),
            Some("Resume to Freebuild")
        );
        assert_eq!(
            resume("Freebuild").describe("bob").as_deref(),
            Some("Resume as alice to Freebuild")
        );
        assert_eq!(
            resume("").describe("alice").as_deref(),
            Some("Resume as alice to 10.0.0.1:25565")
        );
        assert_eq!(ResumeInfo::default().describe("alice"), None);
    }

    #[test]
    fn test_requires_mppass() {
        let mut info = resume("x");
        assert!(!info.is_valid());
        info.mppass = Some("secret".to_string());
        assert!(info.is_valid());
        assert_eq!(info.into_game_args().map(|a| a.port), Some("25565".to_string()));
    }

    #[test]
    fn test_debug_hides_mppass() {
        let args = GameArgs {
            mppass: "secret".to_string(),
            ..GameArgs::singleplayer("alice")
        };
        assert!(!format!("{args:?}").contains("secret"));
    }
}
