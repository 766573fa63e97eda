//! Domain error types.

mod input_error;
mod launch_error;
mod task_error;

pub use input_error::InputError;
pub use launch_error::LaunchError;
pub use task_error::TaskError;
