//! Roster state and its pure update functions.
//!
//! Every update consumes the state and returns the next one. Persisting the
//! selection is the caller's job: save after each accepted mutation.

use crate::models::UserProfile;
use ccroster_core::{ClassifiedCatalog, GroupId, MembershipDiff};
use serde::Serialize;
use std::collections::BTreeSet;

/// The operator as last reported by the membership service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub display_name: Option<String>,
    pub primary_email: Option<String>,
    /// Authoritative "have" set.
    pub call_center_ids: BTreeSet<GroupId>,
    pub is_loaded: bool,
}

impl From<UserProfile> for UserData {
    fn from(profile: UserProfile) -> Self {
        Self {
            call_center_ids: profile.group_ids(),
            display_name: profile.display_name,
            primary_email: profile.primary_email,
            is_loaded: true,
        }
    }
}

/// Everything the roster tool knows between two suspension points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub user: UserData,
    pub catalog: ClassifiedCatalog,
    /// Desired selection ("want" set).
    pub checked: BTreeSet<GroupId>,
    pub is_assigning: bool,
    /// Set when an assign starts; cleared whenever the selection changes.
    pub has_assigned: bool,
}

impl AppState {
    pub fn new(checked: BTreeSet<GroupId>) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    // ── Snapshot ──────────────────────────────────────────────────────

    pub fn have(&self) -> &BTreeSet<GroupId> {
        &self.user.call_center_ids
    }

    pub fn want(&self) -> &BTreeSet<GroupId> {
        &self.checked
    }

    pub fn diff(&self) -> MembershipDiff {
        MembershipDiff::between(self.have(), self.want())
    }

    pub fn is_clean(&self) -> bool {
        self.diff().is_empty()
    }

    pub fn is_member(&self, id: &GroupId) -> bool {
        self.have().contains(id)
    }

    pub fn is_checked(&self, id: &GroupId) -> bool {
        self.checked.contains(id)
    }

    /// Whether every member of the `suffix` shift column is in `ids`.
    ///
    /// False when no cluster carries the suffix.
    fn shift_in(&self, suffix: &str, ids: &BTreeSet<GroupId>) -> bool {
        let column = self.catalog.members_for_suffix(suffix);
        !column.is_empty() && column.iter().all(|record| ids.contains(&record.id))
    }

    pub fn is_shift_member(&self, suffix: &str) -> bool {
        self.shift_in(suffix, self.have())
    }

    pub fn is_shift_checked(&self, suffix: &str) -> bool {
        self.shift_in(suffix, &self.checked)
    }

    /// Suffixes whose whole shift column is selected, in chronological order.
    pub fn checked_shift_suffixes(&self) -> Vec<String> {
        self.catalog
            .suffixes()
            .into_iter()
            .filter(|suffix| self.is_shift_checked(suffix.as_str()))
            .map(ToString::to_string)
            .collect()
    }

    // ── Refresh ───────────────────────────────────────────────────────

    pub fn with_user(self, user: UserData) -> Self {
        Self { user, ..self }
    }

    pub fn with_catalog(self, catalog: ClassifiedCatalog) -> Self {
        Self { catalog, ..self }
    }

    // ── Selection ─────────────────────────────────────────────────────

    /// Replace the selection. `has_assigned` is cleared if it changed.
    pub fn with_checked(self, checked: BTreeSet<GroupId>) -> Self {
        if checked == self.checked {
            return self;
        }
        Self {
            checked,
            has_assigned: false,
            ..self
        }
    }

    pub fn check(self, ids: impl IntoIterator<Item = GroupId>) -> Self {
        let mut checked = self.checked.clone();
        checked.extend(ids);
        self.with_checked(checked)
    }

    pub fn uncheck<'i>(self, ids: impl IntoIterator<Item = &'i GroupId>) -> Self {
        let mut checked = self.checked.clone();
        for id in ids {
            checked.remove(id);
        }
        self.with_checked(checked)
    }

    /// Select every call center in the catalog.
    pub fn check_all(self) -> Self {
        let all = self.catalog.all_ids().into_iter().collect();
        self.with_checked(all)
    }

    pub fn check_none(self) -> Self {
        self.with_checked(BTreeSet::new())
    }

    /// Reset the selection to the current memberships.
    pub fn check_reset(self) -> Self {
        let have = self.have().clone();
        self.with_checked(have)
    }

    /// Select exactly the given shift columns.
    ///
    /// Members of every listed suffix are added; members of every other
    /// suffix present in the catalog are removed. Standalone selections are
    /// left alone.
    pub fn set_checked_shift_suffixes(self, suffixes: &[String]) -> Self {
        let mut checked = self.checked.clone();
        for suffix in self.catalog.suffixes() {
            let wanted = suffixes.iter().any(|s| s == suffix.as_str());
            for record in self.catalog.members_for_suffix(suffix.as_str()) {
                if wanted {
                    checked.insert(record.id.clone());
                } else {
                    checked.remove(&record.id);
                }
            }
        }
        self.with_checked(checked)
    }

    // ── Assign ────────────────────────────────────────────────────────

    /// Enter `Assigning`, freezing the diff to apply.
    pub fn begin_assign(self) -> (Self, MembershipDiff) {
        let diff = self.diff();
        let next = Self {
            is_assigning: true,
            has_assigned: true,
            ..self
        };
        (next, diff)
    }

    /// Return to `Idle`, adopting the refreshed memberships when available.
    pub fn finish_assign(self, refreshed: Option<UserData>) -> Self {
        let idle = Self {
            is_assigning: false,
            ..self
        };
        match refreshed {
            Some(user) => idle.with_user(user),
            None => idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccroster_core::{classify, GroupRecord, ShiftSuffixTable};

    fn ids(values: &[u64]) -> BTreeSet<GroupId> {
        values.iter().map(|v| GroupId::from(*v)).collect()
    }

    /// Arizona A/B/C (1-3), Nevada A/B/C (4-6), Texas (7).
    fn state() -> AppState {
        let records = vec![
            GroupRecord::new(1u64, "Arizona"),
            GroupRecord::new(2u64, "Arizona B"),
            GroupRecord::new(3u64, "Arizona C"),
            GroupRecord::new(4u64, "Nevada"),
            GroupRecord::new(5u64, "Nevada B"),
            GroupRecord::new(6u64, "Nevada C"),
            GroupRecord::new(7u64, "Texas"),
        ];
        let catalog = classify(&records, &ShiftSuffixTable::default(), &[]);
        AppState::new(ids(&[7]))
            .with_catalog(catalog)
            .with_user(UserData {
                call_center_ids: ids(&[1, 4, 7]),
                is_loaded: true,
                ..UserData::default()
            })
    }

    #[test]
    fn test_diff_and_clean() {
        let state = state();
        let diff = state.diff();
        assert_eq!(diff.to_remove, ids(&[1, 4]));
        assert!(diff.to_add.is_empty());
        assert!(!state.is_clean());
        assert!(state.check_reset().is_clean());
    }

    #[test]
    fn test_shift_membership() {
        let state = state();
        assert!(state.is_shift_member("A"));
        assert!(!state.is_shift_member("B"));
        assert!(!state.is_shift_member("F"));
        assert!(!state.is_shift_checked("A"));
    }

    #[test]
    fn test_set_checked_shift_suffixes() {
        let state = state().set_checked_shift_suffixes(&["B".to_string()]);
        assert_eq!(state.checked, ids(&[2, 5, 7]));
        assert_eq!(state.checked_shift_suffixes(), vec!["B".to_string()]);

        let state = state.set_checked_shift_suffixes(&["A".to_string(), "C".to_string()]);
        assert_eq!(state.checked, ids(&[1, 3, 4, 6, 7]));
        assert_eq!(
            state.checked_shift_suffixes(),
            vec!["A".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn test_check_all_and_none() {
        let state = state().check_all();
        assert_eq!(state.checked, ids(&[1, 2, 3, 4, 5, 6, 7]));
        assert!(state.check_none().checked.is_empty());
    }

    #[test]
    fn test_check_and_uncheck() {
        let state = state().check([GroupId::from(2u64)]);
        assert!(state.is_checked(&GroupId::from(2u64)));
        let state = state.uncheck(&ids(&[2, 7]));
        assert!(state.checked.is_empty());
    }

    #[test]
    fn test_selection_change_clears_has_assigned() {
        let (assigning, _) = state().begin_assign();
        let idle = assigning.finish_assign(None);
        assert!(idle.has_assigned);

        // Re-selecting the same set is not a change
        let same = idle.clone().check([GroupId::from(7u64)]);
        assert!(same.has_assigned);

        let changed = idle.check([GroupId::from(3u64)]);
        assert!(!changed.has_assigned);
    }

    #[test]
    fn test_begin_and_finish_assign() {
        let (assigning, diff) = state().begin_assign();
        assert!(assigning.is_assigning);
        assert!(assigning.has_assigned);
        assert_eq!(diff.to_remove, ids(&[1, 4]));

        let refreshed = UserData {
            call_center_ids: ids(&[7]),
            is_loaded: true,
            ..UserData::default()
        };
        let idle = assigning.finish_assign(Some(refreshed));
        assert!(!idle.is_assigning);
        assert!(idle.is_clean());
    }

    #[test]
    fn test_finish_assign_without_refresh_keeps_user() {
        let (assigning, _) = state().begin_assign();
        let idle = assigning.finish_assign(None);
        assert!(!idle.is_assigning);
        assert_eq!(idle.have(), &ids(&[1, 4, 7]));
    }
}
