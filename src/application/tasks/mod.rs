//! Background tasks polled from the UI tick.

mod launcher_tasks;
mod sign_in_flow;
mod web_task;

pub use launcher_tasks::LauncherTasks;
pub use sign_in_flow::{
    FETCHING_SERVERS, FlowEvent, SIGNING_IN, SignInFlow, SignInStage, describe_service_error,
};
pub use web_task::{Progress, ProgressReporter, TaskPoll, WebTask};
