//! Configuration management for the ccroster CLI

mod paths;
mod settings;

pub use paths::ConfigPaths;
pub use settings::Config;
