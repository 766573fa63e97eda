//! Token, sign-in and server-list chain driven one tick at a time.

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::launcher_tasks::LauncherTasks;
use super::web_task::TaskPoll;
use crate::domain::errors::TaskError;

/// Status shown while the token and sign-in requests are in flight.
pub const SIGNING_IN: &str = "Signing in..";
/// Status shown while the server list is fetched.
pub const FETCHING_SERVERS: &str = "Retrieving servers list..";

/// Step of the chain whose task is currently polled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignInStage {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Fetching the anti-forgery token.
    Token,
    /// Submitting credentials.
    SignIn,
    /// Fetching the server list.
    Servers,
}

/// Something the active screen should reflect after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// New status text.
    Status(String),
    /// Sign-in succeeded; the service reported the canonical username.
    SignedIn {
        /// Username with the service's casing.
        username: String,
    },
    /// The chain stopped with a user-facing message.
    Failed(String),
    /// Server list is ready.
    Finished,
}

/// Sequencer for the sign-in chain.
///
/// Each tick polls only the task of the current stage. A stage starts the
/// next task on the same tick its own task completes.
#[derive(Default)]
pub struct SignInFlow {
    stage: SignInStage,
    username: String,
    password: Zeroizing<String>,
}

impl SignInFlow {
    /// Creates idle flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> SignInStage {
        self.stage
    }

    /// Returns whether any step is in flight.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.stage, SignInStage::Idle)
    }

    /// Starts the chain. Returns `false` when a chain is already running.
    pub fn start(&mut self, tasks: &mut LauncherTasks, username: &str, password: &str) -> bool {
        if self.is_active() || tasks.get_token.is_working() {
            return false;
        }

        self.username = username.to_owned();
        self.password = Zeroizing::new(password.to_owned());
        self.stage = SignInStage::Token;
        info!(user = %self.username, "Sign-in started");

        tasks.run_get_token();
        true
    }

    /// Polls the current stage's task and advances the chain.
    pub fn tick(&mut self, tasks: &mut LauncherTasks) -> Option<FlowEvent> {
        match self.stage {
            SignInStage::Idle => None,
            SignInStage::Token => match tasks.get_token.poll() {
                TaskPoll::Idle | TaskPoll::Pending => None,
                TaskPoll::Succeeded => {
                    tasks.run_sign_in(&self.username, &self.password);
                    self.stage = SignInStage::SignIn;
                    Some(FlowEvent::Status(SIGNING_IN.to_string()))
                }
                TaskPoll::Failed(error) => Some(self.fail(&error)),
            },
            SignInStage::SignIn => match tasks.sign_in.poll() {
                TaskPoll::Idle | TaskPoll::Pending => None,
                TaskPoll::Succeeded => {
                    let username = tasks
                        .sign_in
                        .value()
                        .map_or_else(|| self.username.clone(), |s| s.username.clone());
                    self.password = Zeroizing::default();
                    tasks.run_fetch_servers();
                    self.stage = SignInStage::Servers;
                    info!(user = %username, "Signed in");
                    Some(FlowEvent::SignedIn { username })
                }
                TaskPoll::Failed(error) => Some(self.fail(&error)),
            },
            SignInStage::Servers => match tasks.fetch_servers.poll() {
                TaskPoll::Idle | TaskPoll::Pending => None,
                TaskPoll::Succeeded => {
                    self.stage = SignInStage::Idle;
                    info!(count = tasks.servers().len(), "Server list retrieved");
                    Some(FlowEvent::Finished)
                }
                TaskPoll::Failed(error) => Some(self.fail(&error)),
            },
        }
    }

    fn fail(&mut self, error: &TaskError) -> FlowEvent {
        warn!(stage = ?self.stage, error = %error, "Sign-in failed");
        self.stage = SignInStage::Idle;
        self.password = Zeroizing::default();
        FlowEvent::Failed(describe_service_error(error))
    }
}

impl std::fmt::Debug for SignInFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInFlow")
            .field("stage", &self.stage)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Renders a task failure for the status label.
#[must_use]
pub fn describe_service_error(error: &TaskError) -> String {
    match error {
        TaskError::Status { status } => format!("classicube.net returned: {status} error"),
        TaskError::Rejected { message } => message.clone(),
        other => format!("Error when connecting to classicube.net: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SignedIn;
    use crate::domain::ports::mocks::MockLauncherApi;
    use std::sync::Arc;

    fn setup() -> (Arc<MockLauncherApi>, LauncherTasks, SignInFlow) {
        let api = Arc::new(MockLauncherApi::new());
        let tasks = LauncherTasks::new(api.clone());
        (api, tasks, SignInFlow::new())
    }

    async fn tick_until_event(
        flow: &mut SignInFlow,
        tasks: &mut LauncherTasks,
    ) -> Option<FlowEvent> {
        for _ in 0..50 {
            if let Some(event) = flow.tick(tasks) {
                return Some(event);
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_pending_token_does_not_start_sign_in() {
        let (api, mut tasks, mut flow) = setup();
        assert!(flow.start(&mut tasks, "alice", "secret"));

        let _gate = tasks.get_token.begin();
        assert_eq!(flow.tick(&mut tasks), None);
        assert_eq!(flow.tick(&mut tasks), None);

        assert_eq!(flow.stage(), SignInStage::Token);
        assert!(!tasks.sign_in.is_working());
        assert_eq!(api.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_token_success_starts_sign_in_same_tick() {
        let (_api, mut tasks, mut flow) = setup();
        flow.start(&mut tasks, "alice", "secret");

        tasks
            .get_token
            .begin()
            .send(Ok("token".to_string()))
            .unwrap();

        assert_eq!(
            flow.tick(&mut tasks),
            Some(FlowEvent::Status(SIGNING_IN.to_string()))
        );
        assert!(tasks.sign_in.is_working());
        assert_eq!(flow.stage(), SignInStage::SignIn);
    }

    #[tokio::test]
    async fn test_token_status_error_halts_chain() {
        let (api, mut tasks, mut flow) = setup();
        flow.start(&mut tasks, "alice", "secret");

        tasks
            .get_token
            .begin()
            .send(Err(TaskError::status(503)))
            .unwrap();

        let Some(FlowEvent::Failed(message)) = flow.tick(&mut tasks) else {
            panic!("expected failure");
        };
        assert!(message.contains("503"));
        assert!(!flow.is_active());

        for _ in 0..5 {
            assert_eq!(flow.tick(&mut tasks), None);
        }
        assert!(!tasks.sign_in.is_working());
        assert_eq!(api.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_full_chain_reports_corrected_username() {
        let (api, mut tasks, mut flow) = setup();
        api.set_sign_in(Ok(SignedIn {
            username: "Alice".to_string(),
        }));
        flow.start(&mut tasks, "alice", "secret");

        assert_eq!(
            tick_until_event(&mut flow, &mut tasks).await,
            Some(FlowEvent::Status(SIGNING_IN.to_string()))
        );
        assert_eq!(
            tick_until_event(&mut flow, &mut tasks).await,
            Some(FlowEvent::SignedIn {
                username: "Alice".to_string()
            })
        );
        assert!(tasks.fetch_servers.is_working() || tasks.fetch_servers.is_completed());
        assert_eq!(
            tick_until_event(&mut flow, &mut tasks).await,
            Some(FlowEvent::Finished)
        );
        assert_eq!(flow.stage(), SignInStage::Idle);
        assert_eq!(tasks.servers().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_sign_in_message_is_verbatim() {
        let (api, mut tasks, mut flow) = setup();
        api.set_sign_in(Err(TaskError::rejected("Wrong username or password")));
        flow.start(&mut tasks, "alice", "wrong");

        tick_until_event(&mut flow, &mut tasks).await;
        assert_eq!(
            tick_until_event(&mut flow, &mut tasks).await,
            Some(FlowEvent::Failed("Wrong username or password".to_string()))
        );
        assert!(!tasks.fetch_servers.is_working());
    }

    #[tokio::test]
    async fn test_start_refused_while_running() {
        let (_api, mut tasks, mut flow) = setup();
        assert!(flow.start(&mut tasks, "alice", "secret"));
        assert!(!flow.start(&mut tasks, "alice", "secret"));
    }

    #[test]
    fn test_describe_service_error() {
        assert_eq!(
            describe_service_error(&TaskError::status(404)),
            "classicube.net returned: 404 error"
        );
        assert_eq!(
            describe_service_error(&TaskError::transport("timed out")),
            "Error when connecting to classicube.net: transport error: timed out"
        );
    }
}
