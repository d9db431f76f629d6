//! Shift suffix catalog.
//!
//! An ordered list of suffix tokens, each paired with the time label shown
//! next to call centers carrying that suffix. Order encodes shift chronology:
//! the six daily shifts from 6am to 9pm, then the election-day variants.
//!
//! Two label regimes coexist. Ordinary names use the primary label stored at
//! the suffix position. Names starting with [`ELECTION_DAY_MARKER`] whose
//! suffix sits in one of the first [`ELECTION_DAY_CUTOFF`] slots use the
//! three-shift election-day cycle instead.

use crate::error::{CoreError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Primary shift labels, one per daily suffix A..F.
pub const PRIMARY_SHIFT_TIMES: [&str; 6] = [
    "(6am ET)", "(9am ET)", "(12pm ET)", "(3pm ET)", "(6pm ET)", "(9pm ET)",
];

/// Prefix marking call centers staffed on the election-day schedule.
pub const ELECTION_DAY_MARKER: &str = "Election Day";

/// Election-day labels, cycled by suffix position.
pub const ELECTION_DAY_TIMES: [&str; 3] = ["(6am-12pm ET)", "(12pm-6pm ET)", "(6pm-12am ET)"];

/// Suffix positions below this use the election-day cycle for marked names.
pub const ELECTION_DAY_CUTOFF: usize = 6;

/// Suffix implied by a cluster member whose name carries no suffix token.
pub const IMPLICIT_SUFFIX: &str = "A";

static SUFFIX_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]*$").expect("suffix token pattern is valid"));

/// Whether `token` is a well-formed suffix: a capital letter plus optional digits.
pub fn is_suffix_token(token: &str) -> bool {
    SUFFIX_TOKEN_RE.is_match(token)
}

/// One suffix and its primary time label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSuffixEntry {
    pub suffix: String,
    pub display_time: String,
}

impl ShiftSuffixEntry {
    pub fn new(suffix: impl Into<String>, display_time: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            display_time: display_time.into(),
        }
    }
}

/// Ordered shift suffix catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSuffixTable {
    entries: Vec<ShiftSuffixEntry>,
}

impl Default for ShiftSuffixTable {
    fn default() -> Self {
        let mut entries: Vec<ShiftSuffixEntry> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .zip(PRIMARY_SHIFT_TIMES)
            .map(|(suffix, time)| ShiftSuffixEntry::new(*suffix, time))
            .collect();

        for wave in 1..=3 {
            for (letter, time) in ["A", "B", "C"].iter().zip(ELECTION_DAY_TIMES) {
                let label = format!("{}, wave {wave})", time.trim_end_matches(')'));
                entries.push(ShiftSuffixEntry::new(format!("{letter}{wave}"), label));
            }
        }

        Self { entries }
    }
}

impl ShiftSuffixTable {
    /// Build a table from custom entries.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, a malformed token or a repeated token.
    pub fn new(entries: Vec<ShiftSuffixEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CoreError::EmptySuffixTable);
        }
        for (i, entry) in entries.iter().enumerate() {
            if !is_suffix_token(&entry.suffix) {
                return Err(CoreError::InvalidSuffix(entry.suffix.clone()));
            }
            if entries[..i].iter().any(|e| e.suffix == entry.suffix) {
                return Err(CoreError::DuplicateSuffix(entry.suffix.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ShiftSuffixEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suffix tokens in chronological order.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.suffix.as_str())
    }

    /// Position of `suffix` in the table.
    pub fn position(&self, suffix: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.suffix == suffix)
    }

    /// Primary label stored at `position`.
    pub fn label_at(&self, position: usize) -> Option<&str> {
        self.entries.get(position).map(|e| e.display_time.as_str())
    }

    /// Position of the longest known suffix that `name` ends with, as `" " + suffix`.
    pub fn trailing_match(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                name.strip_suffix(e.suffix.as_str())
                    .is_some_and(|rest| rest.ends_with(' '))
            })
            .max_by_key(|(_, e)| e.suffix.len())
            .map(|(i, _)| i)
    }

    /// Time label for a call center name, if it has one.
    ///
    /// Denylisted names are implicitly the earliest shift and get the first
    /// primary label even though they carry no suffix token.
    pub fn display_time_for(&self, name: &str, denylist: &[String]) -> Option<&str> {
        if denylist.iter().any(|d| d == name) {
            return self.label_at(0);
        }

        let position = self.trailing_match(name)?;
        if name.starts_with(ELECTION_DAY_MARKER) && position < ELECTION_DAY_CUTOFF {
            return Some(ELECTION_DAY_TIMES[position % ELECTION_DAY_TIMES.len()]);
        }
        self.label_at(position)
    }

    /// Name decorated with its time label; unmatched names pass through unchanged.
    pub fn display_name_for(&self, name: &str, denylist: &[String]) -> String {
        match self.display_time_for(name, denylist) {
            Some(time) => format!("{name} {time}"),
            None => name.to_string(),
        }
    }
}
