//! CLI command implementations

pub mod assign;
pub mod list;
pub mod select;
pub mod session;
pub mod status;
