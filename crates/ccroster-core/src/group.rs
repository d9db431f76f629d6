//! Group records as returned by the membership service.

use crate::ids::GroupId;
use serde::{Deserialize, Serialize};

/// A named routing group. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    pub display_name: String,
}

impl GroupRecord {
    /// Create a record from an id and display name.
    pub fn new(id: impl Into<GroupId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Sort records by display name (case-sensitive, byte-wise lexicographic).
///
/// The sort is stable, so records sharing a display name keep their
/// relative order.
pub fn sort_by_display_name(records: &mut [GroupRecord]) {
    records.sort_by(|a, b| a.display_name.cmp(&b.display_name));
}
