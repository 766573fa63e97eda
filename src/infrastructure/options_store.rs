//! `options.txt` persistence shared with the game client.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::config::{ConfigError, write_atomic};
use crate::domain::entities::{GameArgs, ResumeInfo};

/// File name inside the data directory.
pub const OPTIONS_FILE_NAME: &str = "options.txt";

/// Option keys written by the launcher.
pub mod keys {
    #![allow(missing_docs)]
    pub const USERNAME: &str = "launcher-cc-username";
    pub const PASSWORD: &str = "launcher-cc-password";

    pub const DC_USERNAME: &str = "launcher-dc-username";
    pub const DC_IP: &str = "launcher-dc-ip";
    pub const DC_PORT: &str = "launcher-dc-port";
    pub const DC_MPPASS: &str = "launcher-dc-mppass";

    pub const RESUME_SERVER: &str = "launcher-server";
    pub const RESUME_USERNAME: &str = "launcher-username";
    pub const RESUME_IP: &str = "launcher-ip";
    pub const RESUME_PORT: &str = "launcher-port";
    pub const RESUME_MPPASS: &str = "launcher-mppass";

    pub const CLASSIC_BACKGROUND: &str = "nostalgia-classicbg";
}

/// Ordered key/value options loaded from and saved to `options.txt`.
#[derive(Debug, Clone)]
pub struct OptionsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    existed: bool,
    dirty: bool,
}

impl OptionsStore {
    /// Creates an empty store that will save to `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
            existed: false,
            dirty: false,
        }
    }

    /// Loads `options.txt` from the data directory. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(OPTIONS_FILE_NAME);
        let mut store = Self::new(path);

        if !store.path.exists() {
            debug!(path = %store.path.display(), "No options file yet");
            return Ok(store);
        }

        let content = fs::read_to_string(&store.path)?;
        store.values = parse(&content);
        store.existed = true;
        info!(count = store.values.len(), "Options loaded");
        Ok(store)
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the file existed when loaded.
    #[must_use]
    pub const fn existed(&self) -> bool {
        self.existed
    }

    /// Returns a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns a value or the empty string.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns a boolean value, `default` when missing or unparsable.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }

    /// Sets a value. An empty value removes the key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let changed = if value.is_empty() {
            self.values.remove(key).is_some()
        } else {
            self.values.insert(key.to_string(), value.clone()).as_ref() != Some(&value)
        };
        self.dirty |= changed;
    }

    /// Sets a boolean value.
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    /// Reads a value obfuscated with [`OptionsStore::set_secure`] under the same user.
    #[must_use]
    pub fn get_secure(&self, key: &str, user: &str) -> Option<String> {
        let encoded = self.get(key)?;
        let Ok(mut data) = STANDARD.decode(encoded) else {
            warn!(key, "Secure option is not valid base64");
            return None;
        };
        apply_keystream(&mut data, user);
        String::from_utf8(data).ok()
    }

    /// Stores a value obfuscated with a keystream derived from `user`.
    ///
    /// This only keeps casual readers of the file from seeing the value.
    pub fn set_secure(&mut self, key: &str, value: &str, user: &str) {
        if value.is_empty() || user.is_empty() {
            self.set(key, "");
            return;
        }
        let mut data = value.as_bytes().to_vec();
        apply_keystream(&mut data, user);
        self.set(key, STANDARD.encode(data));
    }

    /// Reads a colour stored as `RRGGBB`.
    #[must_use]
    pub fn get_colour(&self, key: &str) -> Option<[u8; 3]> {
        let mut rgb = [0_u8; 3];
        hex::decode_to_slice(self.get(key)?, &mut rgb).ok()?;
        Some(rgb)
    }

    /// Stores a colour as `RRGGBB`.
    pub fn set_colour(&mut self, key: &str, rgb: [u8; 3]) {
        self.set(key, hex::encode_upper(rgb));
    }

    /// Returns the last joined server, without its mppass.
    #[must_use]
    pub fn resume_info(&self) -> ResumeInfo {
        ResumeInfo {
            user: self.get_or_empty(keys::RESUME_USERNAME).to_string(),
            ip: self.get_or_empty(keys::RESUME_IP).to_string(),
            port: self.get_or_empty(keys::RESUME_PORT).to_string(),
            server: self.get_or_empty(keys::RESUME_SERVER).to_string(),
            mppass: None,
        }
    }

    /// Returns the last joined server including its mppass.
    #[must_use]
    pub fn full_resume_info(&self) -> ResumeInfo {
        let mut info = self.resume_info();
        info.mppass = self.get_secure(keys::RESUME_MPPASS, &info.user);
        info
    }

    /// Remembers a multiplayer session for the Resume button.
    pub fn save_resume(&mut self, args: &GameArgs) {
        if args.is_singleplayer() {
            return;
        }
        self.set(keys::RESUME_SERVER, args.server.clone());
        self.set(keys::RESUME_USERNAME, args.user.clone());
        self.set(keys::RESUME_IP, args.ip.clone());
        self.set(keys::RESUME_PORT, args.port.clone());
        self.set_secure(keys::RESUME_MPPASS, &args.mppass, &args.user);
    }

    /// Writes the file if anything changed since the last save.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        write_atomic(&self.path, serialize(&self.values).as_bytes())?;
        self.dirty = false;
        self.existed = true;
        info!(path = %self.path.display(), "Options saved");
        Ok(())
    }
}

fn parse(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn serialize(values: &BTreeMap<String, String>) -> String {
    values.iter().fold(String::new(), |mut out, (key, value)| {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
        out
    })
}

fn apply_keystream(data: &mut [u8], user: &str) {
    for (block, chunk) in data.chunks_mut(32).enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(user.as_bytes());
        hasher.update((block as u64).to_le_bytes());
        let pad = hasher.finalize();
        for (byte, key) in chunk.iter_mut().zip(pad.iter()) {
            *byte ^= key;
        }
    }
}
