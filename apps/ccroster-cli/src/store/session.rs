//! Session model for the caller's identity and request headers

use crate::config::ConfigPaths;
use crate::error::{CliError, CliResult};
use ccroster_core::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who the roster is managed for, and how to authenticate as them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,

    /// Sent verbatim with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Session {
    pub fn new(user_id: UserId, headers: BTreeMap<String, String>) -> Self {
        Self { user_id, headers }
    }

    /// Load session from file
    pub fn load(paths: &ConfigPaths) -> CliResult<Option<Self>> {
        if !paths.session_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&paths.session_file)?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    /// Load session, failing with [`CliError::NoSession`] when none is stored
    pub fn require(paths: &ConfigPaths) -> CliResult<Self> {
        Self::load(paths)?.ok_or(CliError::NoSession)
    }

    /// Save session to file
    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.session_file, content)?;
        Ok(())
    }

    /// Delete session file
    pub fn delete(paths: &ConfigPaths) -> CliResult<()> {
        if paths.session_file.exists() {
            std::fs::remove_file(&paths.session_file)?;
        }
        Ok(())
    }

    /// Header names with their values masked.
    pub fn redacted_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), redact(value)))
            .collect()
    }
}

fn redact(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    if value.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Parse a `name:value` header argument.
pub fn parse_header(input: &str) -> CliResult<(String, String)> {
    let (name, value) = input.split_once(':').ok_or_else(|| {
        CliError::Validation(format!("Header '{input}' must be in the form name:value"))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Validation(format!(
            "Header '{input}' has an empty name"
        )));
    }
    Ok((name.to_ascii_lowercase(), value.trim().to_string()))
}
