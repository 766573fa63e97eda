//! Poll-driven background task.
//!
//! A [`WebTask`] runs its future on the tokio runtime and exposes only a
//! non-blocking view to the UI thread: `tick` drains the result channel if a
//! result is ready, and `poll` reports the completion edge exactly once.

use std::future::Future;

use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

use crate::domain::errors::TaskError;

/// Progress of a multi-item download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Item currently being fetched.
    pub item: String,
    /// Zero-based index of the current item.
    pub index: usize,
    /// Number of items.
    pub total: usize,
    /// Percentage of the whole job, once known.
    pub percent: Option<u8>,
}

/// Sends progress updates from inside a running task.
#[derive(Debug, Clone)]
pub struct ProgressReporter(watch::Sender<Option<Progress>>);

impl ProgressReporter {
    /// Publishes a progress update. Updates nobody observes are dropped.
    pub fn report(&self, progress: Progress) {
        let _ = self.0.send(Some(progress));
    }
}

/// What a consumer should do with a task this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPoll {
    /// Not running; nothing to do.
    Idle,
    /// Running; check again next tick.
    Pending,
    /// Just completed successfully.
    Succeeded,
    /// Just completed with a failure.
    Failed(TaskError),
}

type Outcome<T> = Result<T, TaskError>;

/// Background operation observed by polling once per tick.
pub struct WebTask<T> {
    name: &'static str,
    working: bool,
    completed: bool,
    outcome: Option<Outcome<T>>,
    receiver: Option<oneshot::Receiver<Outcome<T>>>,
    progress: Option<watch::Receiver<Option<Progress>>>,
}

impl<T> WebTask<T> {
    /// Creates an idle task.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            working: false,
            completed: false,
            outcome: None,
            receiver: None,
            progress: None,
        }
    }

    /// Returns the task name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns whether the task is in flight.
    #[must_use]
    pub const fn is_working(&self) -> bool {
        self.working
    }

    /// Returns whether the last run finished. Stays set until the next run.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns whether the last run finished successfully.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.completed && matches!(self.outcome, Some(Ok(_)))
    }

    /// Returns the result of a successful run.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            Some(Ok(value)) if self.completed => Some(value),
            _ => None,
        }
    }

    /// Returns the failure detail of a failed run.
    #[must_use]
    pub fn error(&self) -> Option<&TaskError> {
        match &self.outcome {
            Some(Err(error)) if self.completed => Some(error),
            _ => None,
        }
    }

    /// Returns the latest progress report, if the task publishes any.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.progress.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// Resets state for a new run and returns the channel the result must be sent on.
    ///
    /// A result still pending from an earlier run is discarded.
    pub(crate) fn begin(&mut self) -> oneshot::Sender<Outcome<T>> {
        let (tx, rx) = oneshot::channel();
        self.working = true;
        self.completed = false;
        self.outcome = None;
        self.progress = None;
        self.receiver = Some(rx);
        debug!(task = self.name, "Task started");
        tx
    }

    /// Advances the task without blocking: picks up the result if it arrived.
    pub fn tick(&mut self) {
        if !self.working {
            return;
        }
        let Some(receiver) = self.receiver.as_mut() else {
            return;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(TaskError::Aborted),
        };

        match &outcome {
            Ok(_) => debug!(task = self.name, "Task completed"),
            Err(e) => warn!(task = self.name, error = %e, "Task failed"),
        }

        self.receiver = None;
        self.working = false;
        self.completed = true;
        self.outcome = Some(outcome);
    }

    /// Ticks the task and reports the completion edge.
    ///
    /// `Succeeded`/`Failed` are returned on exactly one call per run; after
    /// that the task reads as `Idle` until it is run again.
    pub fn poll(&mut self) -> TaskPoll {
        if !self.working {
            return TaskPoll::Idle;
        }
        self.tick();
        if !self.completed {
            return TaskPoll::Pending;
        }
        match &self.outcome {
            Some(Ok(_)) => TaskPoll::Succeeded,
            Some(Err(error)) => TaskPoll::Failed(error.clone()),
            None => TaskPoll::Failed(TaskError::Aborted),
        }
    }
}

impl<T: Send + 'static> WebTask<T> {
    /// Starts the task, restarting it if it is already running.
    pub fn run<F>(&mut self, future: F)
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        let sender = self.begin();
        tokio::spawn(async move {
            let _ = sender.send(future.await);
        });
    }

    /// Starts the task with a progress channel handed to the future.
    pub fn run_with_progress<F, Fut>(&mut self, make: F)
    where
        F: FnOnce(ProgressReporter) -> Fut,
        Fut: Future<Output = Outcome<T>> + Send + 'static,
    {
        let sender = self.begin();
        let (tx, rx) = watch::channel(None);
        self.progress = Some(rx);
        let future = make(ProgressReporter(tx));
        tokio::spawn(async move {
            let _ = sender.send(future.await);
        });
    }
}

impl<T> std::fmt::Debug for WebTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebTask")
            .field("name", &self.name)
            .field("working", &self.working)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}
