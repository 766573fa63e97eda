//! Application layer with background tasks, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Background tasks and the sign-in sequencer.
pub mod tasks;
/// Use case implementations.
pub mod use_cases;

pub use dto::{DirectConnectRequest, SignInRequest};
pub use tasks::{LauncherTasks, SignInFlow, TaskPoll, WebTask};
pub use use_cases::LaunchGameUseCase;
