//! In-memory membership service that records every call with its dispatch time.

#![allow(dead_code)]

use async_trait::async_trait;
use ccroster_client::error::{ClientError, ClientResult};
use ccroster_client::models::{GroupDetail, MembershipChange, UserProfile};
use ccroster_client::service::MembershipService;
use ccroster_core::{GroupId, GroupRecord, UserId};
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One observed `set_membership` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub group_id: GroupId,
    pub change: MembershipChange,
    pub at: Duration,
}

/// Fake service whose memberships follow the calls it accepts.
pub struct FakeService {
    start: Instant,
    groups: Vec<GroupRecord>,
    memberships: Mutex<BTreeSet<GroupId>>,
    calls: Mutex<Vec<RecordedCall>>,
    failing: BTreeSet<GroupId>,
    fail_get_user: Mutex<bool>,
    get_user_calls: Mutex<usize>,
}

impl FakeService {
    pub fn new(groups: Vec<GroupRecord>, memberships: &[u64]) -> Self {
        Self {
            start: Instant::now(),
            groups,
            memberships: Mutex::new(ids(memberships)),
            calls: Mutex::new(Vec::new()),
            failing: BTreeSet::new(),
            fail_get_user: Mutex::new(false),
            get_user_calls: Mutex::new(0),
        }
    }

    /// Reject `set_membership` for these groups with a 429.
    pub fn failing_on(mut self, groups: &[u64]) -> Self {
        self.failing = ids(groups);
        self
    }

    pub fn set_fail_get_user(&self, fail: bool) {
        *self.fail_get_user.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, add: bool) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.change.is_add() == add)
            .collect()
    }

    pub fn memberships(&self) -> BTreeSet<GroupId> {
        self.memberships.lock().unwrap().clone()
    }

    pub fn get_user_calls(&self) -> usize {
        *self.get_user_calls.lock().unwrap()
    }
}

pub fn ids(values: &[u64]) -> BTreeSet<GroupId> {
    values.iter().map(|v| GroupId::from(*v)).collect()
}

fn rate_limited(group_id: &GroupId) -> ClientError {
    ClientError::RemoteCallFailed {
        method: "PATCH".to_string(),
        url: format!("/api/operator/1?group_id={group_id}"),
        status: 429,
        body: "slow down".to_string(),
    }
}

#[async_trait]
impl MembershipService for FakeService {
    async fn list_groups(&self) -> ClientResult<Vec<GroupRecord>> {
        Ok(self.groups.clone())
    }

    async fn get_user(&self, _user_id: &UserId) -> ClientResult<UserProfile> {
        *self.get_user_calls.lock().unwrap() += 1;
        if *self.fail_get_user.lock().unwrap() {
            return Err(ClientError::Network("connection reset".to_string()));
        }
        let group_details = self
            .memberships()
            .into_iter()
            .map(|id| GroupDetail {
                id,
                display_name: None,
            })
            .collect();
        Ok(UserProfile {
            display_name: Some("Pat Operator".to_string()),
            primary_email: Some("pat@example.com".to_string()),
            group_details,
        })
    }

    async fn set_membership(
        &self,
        _user_id: &UserId,
        group_id: &GroupId,
        change: MembershipChange,
    ) -> ClientResult<()> {
        self.calls.lock().unwrap().push(RecordedCall {
            group_id: group_id.clone(),
            change,
            at: self.start.elapsed(),
        });
        if self.failing.contains(group_id) {
            return Err(rate_limited(group_id));
        }
        let mut memberships = self.memberships.lock().unwrap();
        if change.is_add() {
            memberships.insert(group_id.clone());
        } else {
            memberships.remove(group_id);
        }
        Ok(())
    }
}
