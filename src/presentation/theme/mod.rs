//! Launcher colour scheme.

mod launcher_theme;

pub use launcher_theme::{LauncherTheme, ThemeSlot};
