//! The membership service seam.

use crate::error::ClientResult;
use crate::models::{MembershipChange, UserProfile};
use async_trait::async_trait;
use ccroster_core::{GroupId, GroupRecord, UserId};
use std::sync::Arc;

/// Operations the reconciliation engine needs from the remote service.
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Every call center visible to the caller, in no particular order.
    async fn list_groups(&self) -> ClientResult<Vec<GroupRecord>>;

    /// The user's profile, including current group memberships.
    async fn get_user(&self, user_id: &UserId) -> ClientResult<UserProfile>;

    /// Add the user to, or remove them from, one call center.
    async fn set_membership(
        &self,
        user_id: &UserId,
        group_id: &GroupId,
        change: MembershipChange,
    ) -> ClientResult<()>;
}

#[async_trait]
impl<T: MembershipService + ?Sized> MembershipService for Arc<T> {
    async fn list_groups(&self) -> ClientResult<Vec<GroupRecord>> {
        (**self).list_groups().await
    }

    async fn get_user(&self, user_id: &UserId) -> ClientResult<UserProfile> {
        (**self).get_user(user_id).await
    }

    async fn set_membership(
        &self,
        user_id: &UserId,
        group_id: &GroupId,
        change: MembershipChange,
    ) -> ClientResult<()> {
        (**self).set_membership(user_id, group_id, change).await
    }
}
