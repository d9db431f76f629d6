//! Staggered scheduling of remote calls.
//!
//! The membership service rate-limits bursts of changes. Scheduling spreads a
//! batch of calls out by delaying the k-th call by `k × spacing`; all calls
//! still run concurrently and are joined by a single aggregate future.
//!
//! This is advisory pacing, not admission control: a large enough batch can
//! still hit the remote limiter.

use crate::error::{ClientError, ClientResult};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What happens to not-yet-fired calls once one call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Every scheduled call fires on its timer regardless of failures.
    #[default]
    RunToCompletion,
    /// Calls whose timer has not fired when a failure is observed are skipped.
    CancelPending,
}

/// Delay before the call at `index` is dispatched.
#[must_use]
pub fn delay_for(index: usize, spacing: Duration) -> Duration {
    spacing.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Final state of one scheduled call.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    Completed(T),
    Failed(ClientError),
    /// Cancelled before its timer fired.
    Skipped,
}

/// A call waiting on its dispatch timer.
pub struct ScheduledTask<'a, T> {
    pub index: usize,
    pub delay: Duration,
    future: BoxFuture<'a, TaskOutcome<T>>,
}

impl<T> std::fmt::Debug for ScheduledTask<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("index", &self.index)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Schedule `ops` so the k-th one starts `k × spacing` after the join begins.
///
/// `token` is cancelled on the first failure; under
/// [`FailurePolicy::CancelPending`] tasks still waiting on their timer then
/// resolve as [`TaskOutcome::Skipped`]. Sharing one token across several
/// schedules makes a failure in one visible to all of them.
pub fn schedule<'a, T, F, Fut>(
    ops: Vec<F>,
    spacing: Duration,
    policy: FailurePolicy,
    token: &CancellationToken,
) -> Vec<ScheduledTask<'a, T>>
where
    F: FnOnce() -> Fut + Send + 'a,
    Fut: Future<Output = ClientResult<T>> + Send + 'a,
    T: Send + 'a,
{
    ops.into_iter()
        .enumerate()
        .map(|(index, op)| {
            let delay = delay_for(index, spacing);
            let token = token.clone();
            let cancellable = policy == FailurePolicy::CancelPending;

            let future = async move {
                // A timer that has already fired wins over a concurrent cancellation
                tokio::select! {
                    biased;
                    () = tokio::time::sleep(delay) => {}
                    () = token.cancelled(), if cancellable => {
                        debug!(index, "Skipping scheduled call after earlier failure");
                        return TaskOutcome::Skipped;
                    }
                }

                match op().await {
                    Ok(value) => TaskOutcome::Completed(value),
                    Err(error) => {
                        token.cancel();
                        TaskOutcome::Failed(error)
                    }
                }
            }
            .boxed();

            ScheduledTask {
                index,
                delay,
                future,
            }
        })
        .collect()
}

/// Aggregate result of a joined schedule.
#[derive(Debug)]
pub struct PacedReport<T> {
    pub completed: Vec<T>,
    pub skipped: usize,
    /// Failures in dispatch order.
    pub errors: Vec<ClientError>,
}

impl<T> Default for PacedReport<T> {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            skipped: 0,
            errors: Vec::new(),
        }
    }
}

impl<T> PacedReport<T> {
    pub fn attempted(&self) -> usize {
        self.completed.len() + self.errors.len()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Wait for every scheduled task to settle.
///
/// Never short-circuits: a failure does not drop the remaining futures, so
/// calls already scheduled keep firing unless the policy skips them.
pub async fn join_scheduled<T>(tasks: Vec<ScheduledTask<'_, T>>) -> PacedReport<T> {
    let outcomes = join_all(tasks.into_iter().map(|task| task.future)).await;

    let mut report = PacedReport::default();
    for outcome in outcomes {
        match outcome {
            TaskOutcome::Completed(value) => report.completed.push(value),
            TaskOutcome::Failed(error) => report.errors.push(error),
            TaskOutcome::Skipped => report.skipped += 1,
        }
    }
    report
}
