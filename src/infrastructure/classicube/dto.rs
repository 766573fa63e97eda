//! Wire formats of the account service and build index.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::{ServerInfo, SignedIn, UpdateInfo};
use crate::domain::errors::TaskError;

/// `GET /api/login` response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Anti-forgery token for the sign-in form.
    pub token: String,
}

/// `POST /api/login` response.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    /// Canonical username on success.
    #[serde(default)]
    pub username: Option<String>,
    /// Whether the session is now signed in.
    #[serde(default)]
    pub authenticated: bool,
    /// Names of the fields the service rejected.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl LoginResponse {
    /// Converts to a domain result, mapping field errors to user-facing messages.
    ///
    /// # Errors
    /// Returns `TaskError::Rejected` when the service refused the credentials.
    pub fn into_result(self) -> Result<SignedIn, TaskError> {
        if let Some(field) = self.errors.first() {
            return Err(TaskError::rejected(rejection_message(field)));
        }
        match self.username {
            Some(username) if self.authenticated => Ok(SignedIn { username }),
            _ => Err(TaskError::rejected("Sign in was not accepted")),
        }
    }
}

fn rejection_message(field: &str) -> String {
    match field {
        "password" => "Wrong username or password".to_string(),
        "username" => "Invalid username".to_string(),
        "token" => "Invalid token".to_string(),
        "verification" => "Account verification required".to_string(),
        "login_code" => "Login code required".to_string(),
        other => format!("Sign in failed: {other}"),
    }
}

/// `GET /api/servers` response.
#[derive(Debug, Deserialize)]
pub struct ServerListResponse {
    /// Public servers.
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// One entry of the server list.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct ServerEntry {
    pub hash: String,
    pub name: String,
    #[serde(default)]
    pub players: u32,
    #[serde(default, rename = "maxplayers")]
    pub max_players: u32,
    #[serde(default)]
    pub software: String,
    #[serde(default)]
    pub uptime: u64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub mppass: String,
}

impl From<ServerEntry> for ServerInfo {
    fn from(entry: ServerEntry) -> Self {
        Self {
            hash: entry.hash,
            name: entry.name,
            players: entry.players,
            max_players: entry.max_players,
            software: entry.software,
            uptime: entry.uptime,
            featured: entry.featured,
            ip: entry.ip,
            port: entry.port,
            mppass: entry.mppass,
        }
    }
}

/// `builds.json` on the build server.
#[derive(Debug, Deserialize)]
pub struct BuildsResponse {
    /// Unix time of the latest release.
    #[serde(default)]
    pub release_ts: Option<f64>,
    /// Unix time of the latest development build.
    #[serde(default)]
    pub latest_ts: Option<f64>,
    /// Version of the latest release.
    #[serde(default)]
    pub release_version: String,
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp(seconds: Option<f64>) -> Option<DateTime<Utc>> {
    seconds
        .filter(|s| s.is_finite() && *s > 0.0)
        .and_then(|s| DateTime::from_timestamp(s as i64, 0))
}

impl From<BuildsResponse> for UpdateInfo {
    fn from(builds: BuildsResponse) -> Self {
        Self {
            release_at: timestamp(builds.release_ts),
            dev_at: timestamp(builds.latest_ts),
            latest_release: builds.release_version,
        }
    }
}
