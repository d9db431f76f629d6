//! ccroster CLI - reconcile an operator's call center memberships
//!
//! Commands load the session and selection from the config directory, fetch
//! the call center catalog and the operator's memberships, then mutate the
//! selection or apply it.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod store;
