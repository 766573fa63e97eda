//! Downloadable game resources.

use serde::{Deserialize, Serialize};

/// A file the game needs that the launcher can download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFile {
    /// Path relative to the game data directory.
    pub path: String,
    /// Download location.
    pub url: String,
    /// Expected size in bytes, for the prompt.
    #[serde(default)]
    pub size: u64,
}

impl ResourceFile {
    /// Returns the final path component, used in status text.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Total download size in megabytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn total_megabytes(files: &[ResourceFile]) -> f64 {
    files.iter().map(|f| f.size).sum::<u64>() as f64 / (1024.0 * 1024.0)
}

/// Resources a fresh install needs.
#[must_use]
pub fn default_resources() -> Vec<ResourceFile> {
    vec![
        ResourceFile {
            path: "texpacks/default.zip".to_string(),
            url: "https://static.classicube.net/default.zip".to_string(),
            size: 1_500_000,
        },
        ResourceFile {
            path: "audio/calm1.ogg".to_string(),
            url: "https://static.classicube.net/audio/calm1.ogg".to_string(),
            size: 2_400_000,
        },
        ResourceFile {
            path: "audio/calm2.ogg".to_string(),
            url: "https://static.classicube.net/audio/calm2.ogg".to_string(),
            size: 1_900_000,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_strips_directories() {
        let file = ResourceFile {
            path: "texpacks/default.zip".to_string(),
            url: String::new(),
            size: 0,
        };
        assert_eq!(file.name(), "default.zip");
    }

    #[test]
    fn test_total_megabytes() {
        let files = vec![ResourceFile {
            path: "a".to_string(),
            url: String::new(),
            size: 2 * 1024 * 1024,
        }];
        assert!((total_megabytes(&files) - 2.0).abs() < f64::EPSILON);
    }
}
