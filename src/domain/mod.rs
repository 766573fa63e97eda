//! Domain layer with core entities, geometry and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Screen-space geometry.
pub mod geometry;
/// Port definitions.
pub mod ports;

pub use errors::{InputError, LaunchError, TaskError};
pub use geometry::{Anchor, Bounds, Placement};
pub use ports::{GamePort, LauncherApiPort};
