//! ccroster Core Library
//!
//! Pure building blocks for call center roster management.
//!
//! # Modules
//!
//! - [`ids`] - Opaque identifiers (GroupId, UserId)
//! - [`group`] - Group records as fetched from the membership service
//! - [`suffix`] - Ordered shift suffix catalog and time labels
//! - [`classifier`] - Partitioning of group lists into standalone entries and shift clusters
//! - [`diff`] - Have/want membership set difference
//! - [`error`] - Standardized error types (CoreError)
//!
//! # Example
//!
//! ```
//! use ccroster_core::{classify, GroupRecord, ShiftSuffixTable};
//!
//! let records = vec![
//!     GroupRecord::new(1u64, "Arizona"),
//!     GroupRecord::new(2u64, "Arizona B"),
//!     GroupRecord::new(3u64, "Arizona C"),
//!     GroupRecord::new(4u64, "Texas"),
//! ];
//!
//! let catalog = classify(&records, &ShiftSuffixTable::default(), &[]);
//! assert_eq!(catalog.standalone.len(), 1);
//! assert!(catalog.cluster("Arizona").is_some());
//! ```

pub mod classifier;
pub mod diff;
pub mod error;
pub mod group;
pub mod ids;
pub mod suffix;

pub use classifier::{classify, ClassifiedCatalog, ShiftCluster, ShiftSuffix, MIN_CLUSTER_RUN};
pub use diff::{difference, MembershipDiff};
pub use error::{CoreError, Result};
pub use group::{sort_by_display_name, GroupRecord};
pub use ids::{GroupId, UserId};
pub use suffix::{ShiftSuffixEntry, ShiftSuffixTable};
