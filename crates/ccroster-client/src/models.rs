//! Wire models for the group membership service.

use ccroster_core::{GroupId, GroupRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skill level attached to every added membership unless configured otherwise.
pub const DEFAULT_SKILL_LEVEL: u32 = 100;

/// A group the user belongs to, as listed in the user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetail {
    pub id: GroupId,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// User profile response (`GET /api/user/{id}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub group_details: Vec<GroupDetail>,
}

impl UserProfile {
    /// Ids of every group the user currently belongs to.
    pub fn group_ids(&self) -> BTreeSet<GroupId> {
        self.group_details.iter().map(|g| g.id.clone()).collect()
    }
}

/// Direction of a single membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Add { skill_level: u32 },
    Remove,
}

impl MembershipChange {
    /// Request body for the operator PATCH endpoint.
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            Self::Add { skill_level } => serde_json::json!({
                "add": true,
                "skill_level": skill_level,
            }),
            Self::Remove => serde_json::json!({ "remove": true }),
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add { .. })
    }
}

impl std::fmt::Display for MembershipChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add { .. } => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Group list response (`GET /api/group`); a bare JSON array.
pub type GroupListResponse = Vec<GroupRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_group_ids() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "display_name": "Pat Operator",
            "primary_email": "pat@example.com",
            "group_details": [
                { "id": 3, "display_name": "Arizona", "skill_level": 100 },
                { "id": 1 }
            ]
        }))
        .unwrap();

        let ids: Vec<String> = profile.group_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_user_profile_missing_groups() {
        let profile: UserProfile =
            serde_json::from_value(serde_json::json!({ "display_name": "Pat" })).unwrap();
        assert!(profile.group_ids().is_empty());
        assert!(profile.primary_email.is_none());
    }

    #[test]
    fn test_membership_change_bodies() {
        assert_eq!(
            MembershipChange::Add { skill_level: 100 }.to_body(),
            serde_json::json!({ "add": true, "skill_level": 100 })
        );
        assert_eq!(
            MembershipChange::Remove.to_body(),
            serde_json::json!({ "remove": true })
        );
    }
}
