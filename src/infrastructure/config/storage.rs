use super::app_config::AppConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while reading or writing launcher files.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Finds `config.toml` and writes the defaults on first run.
#[derive(Debug)]
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the platform has no config directory.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = AppConfig::default_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(Self { config_dir })
    }

    /// Uses `config_dir` instead of the platform directory.
    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Reads the configuration, writing a default file when there is none.
    ///
    /// A file that fails to parse is kept as is and defaults are used for this run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_path(path_override);

        if !path.exists() {
            let config = AppConfig::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            write_atomic(&path, toml::to_string_pretty(&config)?.as_bytes())?;
            info!(path = %path.display(), "Wrote default config");
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let config = toml::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Config is malformed, using defaults");
            AppConfig::default()
        });
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }
}

/// Replaces `path` through a temporary sibling so readers never see a partial file.
///
/// # Errors
///
/// Returns an io error if the temporary file cannot be written or renamed.
pub fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("path has no parent directory"))?;
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("cubelaunch"));

        let config = manager.load_config(None).unwrap();
        assert!(config.mouse);
        let written = fs::read_to_string(dir.path().join("cubelaunch").join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("api_base_url"));

        let reloaded = manager.load_config(None).unwrap();
        assert_eq!(reloaded.tick_rate_ms, config.tick_rate_ms);
    }

    #[test]
    fn test_malformed_file_is_kept() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "close_on_launch = [").unwrap();

        let config = manager.load_config(None).unwrap();
        assert!(!config.close_on_launch);
        assert_eq!(fs::read_to_string(&path).unwrap(), "close_on_launch = [");
    }

    #[test]
    fn test_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "close_on_launch = true").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();
        assert!(config.close_on_launch);
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.txt");

        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }
}
