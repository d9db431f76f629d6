//! Membership diff between the current ("have") and desired ("want") sets.

use crate::ids::GroupId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Elements of `a` that are not in `b`.
pub fn difference<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.difference(b).cloned().collect()
}

/// Minimal set of membership changes turning `have` into `want`.
///
/// `to_add = want - have` and `to_remove = have - want`; the two are always
/// disjoint and both empty exactly when `have == want`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipDiff {
    pub to_add: BTreeSet<GroupId>,
    pub to_remove: BTreeSet<GroupId>,
}

impl MembershipDiff {
    pub fn between(have: &BTreeSet<GroupId>, want: &BTreeSet<GroupId>) -> Self {
        Self {
            to_add: difference(want, have),
            to_remove: difference(have, want),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Total number of remote calls needed to apply the diff.
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}
