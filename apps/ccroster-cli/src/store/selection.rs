//! Persisted call center selection (`selection.json`)

use crate::config::ConfigPaths;
use crate::error::CliResult;
use ccroster_core::GroupId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub checked_call_center_ids: BTreeSet<GroupId>,
}

impl Selection {
    pub fn new(checked_call_center_ids: BTreeSet<GroupId>) -> Self {
        Self {
            checked_call_center_ids,
        }
    }

    /// Load the selection; an absent file is an empty selection.
    pub fn load(paths: &ConfigPaths) -> CliResult<Self> {
        if !paths.selection_file.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&paths.selection_file)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.selection_file, content)?;
        Ok(())
    }
}
