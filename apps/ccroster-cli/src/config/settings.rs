//! Persistent CLI settings (`config.json`)

use super::ConfigPaths;
use crate::error::{CliError, CliResult};
use ccroster_client::{
    EngineSettings, FailurePolicy, DEFAULT_ADD_SPACING, DEFAULT_API_URL, DEFAULT_REMOVE_SPACING,
    DEFAULT_SKILL_LEVEL,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "CCROSTER_API_URL";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_add_spacing_ms() -> u64 {
    DEFAULT_ADD_SPACING.as_millis() as u64
}

fn default_remove_spacing_ms() -> u64 {
    DEFAULT_REMOVE_SPACING.as_millis() as u64
}

fn default_skill_level() -> u32 {
    DEFAULT_SKILL_LEVEL
}

fn default_denylist() -> Vec<String> {
    vec!["National Spanish".to_string()]
}

/// CLI configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_add_spacing_ms")]
    pub add_spacing_ms: u64,

    #[serde(default = "default_remove_spacing_ms")]
    pub remove_spacing_ms: u64,

    #[serde(default = "default_skill_level")]
    pub skill_level: u32,

    /// Call center names never clustered into shifts
    #[serde(default = "default_denylist")]
    pub denylisted_shift_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            add_spacing_ms: default_add_spacing_ms(),
            remove_spacing_ms: default_remove_spacing_ms(),
            skill_level: default_skill_level(),
            denylisted_shift_prefixes: default_denylist(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// `CCROSTER_API_URL` overrides the stored `api_url`.
    pub fn load(paths: &ConfigPaths) -> CliResult<Self> {
        let config = Self::load_file(paths)?;
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    fn load_file(paths: &ConfigPaths) -> CliResult<Self> {
        if !paths.config_file.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&paths.config_file)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.config_file, content)?;
        Ok(())
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    fn validate(&self) -> CliResult<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Engine tunables for an assign run.
    pub fn to_engine_settings(&self, failure_policy: FailurePolicy) -> EngineSettings {
        EngineSettings {
            add_spacing: Duration::from_millis(self.add_spacing_ms),
            remove_spacing: Duration::from_millis(self.remove_spacing_ms),
            skill_level: self.skill_level,
            failure_policy,
        }
    }
}
