//! Membership diff application.
//!
//! Turns a [`MembershipDiff`] into paced add/remove calls against a
//! [`MembershipService`]. Both directions run concurrently, each staggered
//! with its own spacing, and the whole application settles only once every
//! scheduled call has.

use crate::error::{ClientError, ClientResult};
use crate::models::{MembershipChange, DEFAULT_SKILL_LEVEL};
use crate::pacing::{
    delay_for, join_scheduled, schedule, FailurePolicy, PacedReport, ScheduledTask,
};
use crate::service::MembershipService;
use ccroster_core::{GroupId, MembershipDiff, UserId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Spacing between consecutive additions.
pub const DEFAULT_ADD_SPACING: Duration = Duration::from_millis(325);

/// Spacing between consecutive removals; removals are rate-limited harder.
pub const DEFAULT_REMOVE_SPACING: Duration = Duration::from_millis(750);

/// Tunables for applying a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub add_spacing: Duration,
    pub remove_spacing: Duration,
    pub skill_level: u32,
    pub failure_policy: FailurePolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            add_spacing: DEFAULT_ADD_SPACING,
            remove_spacing: DEFAULT_REMOVE_SPACING,
            skill_level: DEFAULT_SKILL_LEVEL,
            failure_policy: FailurePolicy::RunToCompletion,
        }
    }
}

/// Direction of a planned call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Add,
    Remove,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Add => write!(f, "add"),
            Direction::Remove => write!(f, "remove"),
        }
    }
}

/// One call the engine would make, with its dispatch offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCall {
    pub group_id: GroupId,
    pub direction: Direction,
    #[serde(serialize_with = "serialize_millis")]
    pub delay: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Counts from a successful application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub added: usize,
    pub removed: usize,
}

/// Applies membership diffs through a paced strategy.
pub struct MembershipDiffEngine<'s, S: ?Sized> {
    service: &'s S,
    settings: EngineSettings,
}

impl<'s, S: MembershipService + ?Sized> MembershipDiffEngine<'s, S> {
    pub fn new(service: &'s S, settings: EngineSettings) -> Self {
        Self { service, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Every call `apply` would make, adds first, with their dispatch delays.
    pub fn plan(&self, diff: &MembershipDiff) -> Vec<PlannedCall> {
        let planned = |ids: &BTreeSet<GroupId>, direction: Direction, spacing: Duration| {
            ids.iter()
                .enumerate()
                .map(move |(i, id)| PlannedCall {
                    group_id: id.clone(),
                    direction,
                    delay: delay_for(i, spacing),
                })
                .collect::<Vec<_>>()
        };

        let mut calls = planned(&diff.to_add, Direction::Add, self.settings.add_spacing);
        calls.extend(planned(
            &diff.to_remove,
            Direction::Remove,
            self.settings.remove_spacing,
        ));
        calls
    }

    /// Apply `diff` for `user_id`.
    ///
    /// Resolves once every scheduled call has settled. Fails if any call
    /// failed; calls that succeeded are not rolled back.
    pub async fn apply(
        &self,
        user_id: &UserId,
        diff: &MembershipDiff,
    ) -> ClientResult<ApplySummary> {
        info!(
            user_id = %user_id,
            to_add = diff.to_add.len(),
            to_remove = diff.to_remove.len(),
            "Applying membership changes"
        );

        let token = CancellationToken::new();
        let add = MembershipChange::Add {
            skill_level: self.settings.skill_level,
        };
        let adds = self.schedule_direction(
            user_id,
            &diff.to_add,
            add,
            self.settings.add_spacing,
            &token,
        );
        let removes = self.schedule_direction(
            user_id,
            &diff.to_remove,
            MembershipChange::Remove,
            self.settings.remove_spacing,
            &token,
        );

        let (added, removed) = tokio::join!(join_scheduled(adds), join_scheduled(removes));
        Self::summarize(added, removed)
    }

    fn schedule_direction<'a>(
        &'a self,
        user_id: &'a UserId,
        ids: &BTreeSet<GroupId>,
        change: MembershipChange,
        spacing: Duration,
        token: &CancellationToken,
    ) -> Vec<ScheduledTask<'a, GroupId>> {
        if !ids.is_empty() {
            info!("Will {} {} call centers", change, ids.len());
        }

        let service = self.service;
        let ops: Vec<_> = ids
            .iter()
            .cloned()
            .map(move |group_id| {
                move || async move {
                    info!(group_id = %group_id, "Will {} {}", change, group_id);
                    service
                        .set_membership(user_id, &group_id, change)
                        .await
                        .map(|()| group_id)
                }
            })
            .collect();

        schedule(ops, spacing, self.settings.failure_policy, token)
    }

    fn summarize(
        added: PacedReport<GroupId>,
        removed: PacedReport<GroupId>,
    ) -> ClientResult<ApplySummary> {
        let attempted = added.attempted() + removed.attempted();
        let skipped = added.skipped + removed.skipped;
        let summary = ApplySummary {
            added: added.completed.len(),
            removed: removed.completed.len(),
        };

        let mut errors = added.errors.into_iter().chain(removed.errors);
        let Some(first) = errors.next() else {
            info!(
                added = summary.added,
                removed = summary.removed,
                "Membership changes applied"
            );
            return Ok(summary);
        };

        let failed = 1 + errors.count();
        warn!(
            failed,
            attempted,
            skipped,
            added = summary.added,
            removed = summary.removed,
            error = %first,
            "Membership changes failed"
        );
        Err(ClientError::ApplyFailed {
            failed,
            attempted,
            source: Box::new(first),
        })
    }
}
