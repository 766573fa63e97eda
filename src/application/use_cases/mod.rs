//! Use case implementations.

mod launch_game_use_case;

pub use launch_game_use_case::LaunchGameUseCase;
