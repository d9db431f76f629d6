//! Error Types
//!
//! Errors raised while building the static shift catalog. Classification
//! and diffing never fail: a group list always yields a deterministic result.

use thiserror::Error;

/// Standardized error type for ccroster-core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A suffix table must contain at least one entry.
    #[error("Shift suffix table is empty")]
    EmptySuffixTable,

    /// Suffix tokens are a capital letter optionally followed by digits.
    #[error("Invalid shift suffix '{0}': expected a capital letter optionally followed by digits")]
    InvalidSuffix(String),

    /// Each suffix may appear only once in a table.
    #[error("Duplicate shift suffix '{0}'")]
    DuplicateSuffix(String),
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
