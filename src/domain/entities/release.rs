//! Game build and release metadata.

use std::fmt;

use chrono::{DateTime, Utc};

/// Result of the update check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateInfo {
    /// When the latest release was published.
    pub release_at: Option<DateTime<Utc>>,
    /// When the latest development build was published.
    pub dev_at: Option<DateTime<Utc>>,
    /// Version string of the latest release.
    pub latest_release: String,
}

impl UpdateInfo {
    /// Returns whether the latest release is newer than `current`.
    #[must_use]
    pub fn is_newer_than(&self, current: &str) -> bool {
        let latest = ReleaseVersion::parse(&self.latest_release).unwrap_or_default();
        let current = ReleaseVersion::parse(current).unwrap_or_default();
        latest > current
    }

    /// Returns the publish time of a channel.
    #[must_use]
    pub const fn published(&self, channel: BuildChannel) -> Option<DateTime<Utc>> {
        match channel {
            BuildChannel::Release => self.release_at,
            BuildChannel::Dev => self.dev_at,
        }
    }
}

/// Dotted version with up to four numeric components, packed big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion(u32);

impl ReleaseVersion {
    /// Parses `a.b.c.d`, padding missing trailing components with zero.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut raw = [0_u8; 4];
        let mut count = 0;
        for (i, part) in text.trim().split('.').enumerate() {
            let slot = raw.get_mut(i)?;
            *slot = part.parse().ok()?;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self(u32::from_be_bytes(raw)))
    }
}

/// Which build stream to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildChannel {
    /// Stable release.
    Release,
    /// Latest development build.
    Dev,
}

/// Renderer the downloaded build is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFlavor {
    /// Direct3D 9 renderer.
    Direct3D9,
    /// OpenGL renderer.
    OpenGl,
}

impl fmt::Display for BuildFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct3D9 => write!(f, "Direct3D9"),
            Self::OpenGl => write!(f, "OpenGL"),
        }
    }
}

/// A specific build to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTarget {
    /// Build stream.
    pub channel: BuildChannel,
    /// Renderer flavour.
    pub flavor: BuildFlavor,
}

impl BuildTarget {
    /// Status text shown while the build downloads.
    #[must_use]
    pub fn fetching_text(&self) -> String {
        let channel = match self.channel {
            BuildChannel::Release => "latest release",
            BuildChannel::Dev => "latest dev build",
        };
        format!("Fetching {channel} ({})", self.flavor)
    }
}

/// Formats an elapsed duration like `5 minutes ago`.
#[must_use]
pub fn describe_age(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    let delta = (now - then).num_seconds().max(0);
    let (unit, name) = if delta < MINUTE {
        (1, "second")
    } else if delta < HOUR {
        (MINUTE, "minute")
    } else if delta < DAY {
        (HOUR, "hour")
    } else {
        (DAY, "day")
    };

    let amount = delta / unit;
    if amount > 1 {
        format!("{amount} {name}s ago")
    } else {
        format!("{amount} {name} ago")
    }
}
