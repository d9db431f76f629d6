//! Membership service client and reconciliation for ccroster.
//!
//! - [`client`] - reqwest client for the group, user and operator endpoints
//! - [`service`] - the [`MembershipService`] seam
//! - [`pacing`] - staggered scheduling of remote calls
//! - [`engine`] - paced application of a membership diff
//! - [`state`] - roster state and its pure updates
//! - [`controller`] - the assign cycle over an explicit state

pub mod client;
pub mod controller;
pub mod engine;
pub mod error;
pub mod models;
pub mod pacing;
pub mod service;
pub mod state;

pub use client::{DialpadClient, DEFAULT_API_URL};
pub use controller::ReconciliationController;
pub use engine::{
    ApplySummary, Direction, EngineSettings, MembershipDiffEngine, PlannedCall,
    DEFAULT_ADD_SPACING, DEFAULT_REMOVE_SPACING,
};
pub use error::{ClientError, ClientResult};
pub use models::{MembershipChange, UserProfile, DEFAULT_SKILL_LEVEL};
pub use pacing::FailurePolicy;
pub use service::MembershipService;
pub use state::{AppState, UserData};
