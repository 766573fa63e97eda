//! Public server listing entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server advertised on the public server list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Unique hash identifying the server on the listing.
    pub hash: String,
    /// Display name.
    pub name: String,
    /// Connected players.
    pub players: u32,
    /// Player capacity.
    pub max_players: u32,
    /// Server software name.
    pub software: String,
    /// Uptime in seconds.
    pub uptime: u64,
    /// Whether the listing features the server.
    pub featured: bool,
    /// Address to connect to.
    pub ip: String,
    /// Port to connect to.
    pub port: u16,
    /// Multiplayer pass issued for the signed-in user.
    pub mppass: String,
}

impl ServerInfo {
    /// Returns uptime as a short human string (`42s`, `5m`, `3h`, `2d`).
    #[must_use]
    pub fn uptime_text(&self) -> String {
        let secs = self.uptime;
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86_400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86_400)
        }
    }

    /// Returns whether the name matches a case-insensitive search filter.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        filter.is_empty() || self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

impl fmt::Display for ServerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.ip, self.port)
    }
}

/// Extracts the server hash from user input, accepting full play URLs.
#[must_use]
pub fn parse_server_hash(input: &str) -> Option<&str> {
    let trimmed = input.trim().trim_end_matches('/');
    let hash = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if hash.is_empty() { None } else { Some(hash) }
}
