//! Shift cluster classification.
//!
//! Partitions an alphabetically sorted list of call centers into standalone
//! entries and shift clusters: runs of names such as "Arizona", "Arizona B",
//! "Arizona C" that are really one logical center staffed in shifts.
//!
//! The scan walks the sorted list with a cursor. At each position the current
//! name is the candidate prefix; names shaped like `<base> <LETTER><digits>`
//! are normalized to `<base>`. The run is extended while the following names
//! are either the prefix itself (implicit suffix "A") or the prefix plus a
//! suffix token. Runs longer than [`MIN_CLUSTER_RUN`] become a cluster, shorter
//! runs stay standalone. Denylisted names never start or extend a run.

use crate::group::GroupRecord;
use crate::ids::GroupId;
use crate::suffix::{is_suffix_token, ShiftSuffixTable, IMPLICIT_SUFFIX};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

/// Runs of this length or shorter never form a cluster.
pub const MIN_CLUSTER_RUN: usize = 2;

static SHIFT_VARIANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+) ([A-Z][0-9]*)$").expect("shift variant pattern is valid")
});

/// A suffix token ranked by its chronological position in the suffix table.
///
/// Tokens unknown to the table sort after every known one, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftSuffix {
    rank: usize,
    token: String,
}

impl ShiftSuffix {
    pub fn new(token: impl Into<String>, table: &ShiftSuffixTable) -> Self {
        let token = token.into();
        let rank = table.position(&token).unwrap_or(table.len());
        Self { rank, token }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl Display for ShiftSuffix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

impl Serialize for ShiftSuffix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token)
    }
}

/// Shift variants of one logical call center.
///
/// Every member's display name is `prefix + " " + suffix`, except that the
/// "A" member may be named by the bare prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftCluster {
    pub prefix: String,
    pub members: BTreeMap<ShiftSuffix, GroupRecord>,
}

impl ShiftCluster {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            members: BTreeMap::new(),
        }
    }

    /// Member carrying `suffix`, if any.
    pub fn member(&self, suffix: &str) -> Option<&GroupRecord> {
        self.members
            .iter()
            .find(|(s, _)| s.as_str() == suffix)
            .map(|(_, record)| record)
    }

    fn has_suffix(&self, suffix: &str) -> bool {
        self.member(suffix).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of classifying a group list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedCatalog {
    pub standalone: Vec<GroupRecord>,
    pub clusters: BTreeMap<String, ShiftCluster>,
}

impl ClassifiedCatalog {
    pub fn cluster(&self, prefix: &str) -> Option<&ShiftCluster> {
        self.clusters.get(prefix)
    }

    /// Every record in the catalog: standalone first, then clusters by prefix.
    pub fn records(&self) -> impl Iterator<Item = &GroupRecord> {
        self.standalone.iter().chain(
            self.clusters
                .values()
                .flat_map(|cluster| cluster.members.values()),
        )
    }

    /// Ids of every record in the catalog, in [`records`](Self::records) order.
    pub fn all_ids(&self) -> Vec<GroupId> {
        self.records().map(|r| r.id.clone()).collect()
    }

    pub fn standalone_ids(&self) -> Vec<GroupId> {
        self.standalone.iter().map(|r| r.id.clone()).collect()
    }

    /// The shift column for `suffix`: members carrying it across all clusters.
    pub fn members_for_suffix(&self, suffix: &str) -> Vec<&GroupRecord> {
        self.clusters
            .values()
            .filter_map(|cluster| cluster.member(suffix))
            .collect()
    }

    /// Suffixes present in at least one cluster, in chronological order.
    pub fn suffixes(&self) -> Vec<&ShiftSuffix> {
        let mut suffixes: Vec<&ShiftSuffix> = self
            .clusters
            .values()
            .flat_map(|cluster| cluster.members.keys())
            .collect();
        suffixes.sort();
        suffixes.dedup();
        suffixes
    }

    pub fn find(&self, id: &GroupId) -> Option<&GroupRecord> {
        self.records().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.standalone.len() + self.clusters.values().map(ShiftCluster::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Base name of a `<base> <LETTER><digits>` shaped name, else the name itself.
fn shift_base(name: &str) -> &str {
    SHIFT_VARIANT_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |base| base.as_str())
}

/// Suffix of `name` relative to `prefix`, if `name` is a variant of it.
///
/// The remainder after `prefix + " "` must be a whole suffix token, so
/// "Texas Annex" is not a variant of "Texas".
fn variant_suffix<'n>(name: &'n str, prefix: &str) -> Option<&'n str> {
    if name == prefix {
        return Some(IMPLICIT_SUFFIX);
    }
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(' '))
        .filter(|token| is_suffix_token(token))
}

/// Longest run starting at `records[0]` whose names are variants of `prefix`.
///
/// Stops at the first non-variant, denylisted name, or suffix already taken
/// by the run or by `existing`. Empty if the head itself does not qualify.
fn scan_run<'a>(
    records: &[&'a GroupRecord],
    prefix: &str,
    table: &ShiftSuffixTable,
    denylist: &[String],
    existing: Option<&ShiftCluster>,
) -> Vec<(ShiftSuffix, &'a GroupRecord)> {
    let mut run: Vec<(ShiftSuffix, &GroupRecord)> = Vec::new();

    for record in records {
        if is_denylisted(&record.display_name, denylist) {
            break;
        }
        let Some(token) = variant_suffix(&record.display_name, prefix) else {
            break;
        };
        let taken = run.iter().any(|(s, _)| s.as_str() == token)
            || existing.is_some_and(|cluster| cluster.has_suffix(token));
        if taken {
            break;
        }
        run.push((ShiftSuffix::new(token, table), record));
    }

    run
}

fn is_denylisted(name: &str, denylist: &[String]) -> bool {
    denylist.iter().any(|d| d == name)
}

/// Classify call centers into standalone entries and shift clusters.
///
/// `records` is expected sorted by display name; it is stably re-sorted so
/// already-sorted input is left in its given order. Every input record ends
/// up in exactly one place in the result.
pub fn classify(
    records: &[GroupRecord],
    table: &ShiftSuffixTable,
    denylist: &[String],
) -> ClassifiedCatalog {
    let mut sorted: Vec<&GroupRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    let mut catalog = ClassifiedCatalog::default();
    let mut cursor = 0;

    while cursor < sorted.len() {
        let head = sorted[cursor];
        let prefix = shift_base(&head.display_name);

        let run = if is_denylisted(prefix, denylist) {
            Vec::new()
        } else {
            scan_run(
                &sorted[cursor..],
                prefix,
                table,
                denylist,
                catalog.clusters.get(prefix),
            )
        };

        let run_len = run.len().max(1);
        if run.len() > MIN_CLUSTER_RUN {
            let cluster = catalog
                .clusters
                .entry(prefix.to_string())
                .or_insert_with(|| ShiftCluster::new(prefix));
            for (suffix, record) in run {
                cluster.members.insert(suffix, record.clone());
            }
        } else {
            catalog
                .standalone
                .extend(sorted[cursor..cursor + run_len].iter().map(|r| (*r).clone()));
        }
        cursor += run_len;
    }

    catalog
}
