//! Everything a roster command needs: config, session, and a controller.

use crate::config::{Config, ConfigPaths};
use crate::error::CliResult;
use crate::store::{Selection, Session};
use ccroster_client::{AppState, DialpadClient, FailurePolicy, ReconciliationController};
use tracing::debug;

pub struct Roster {
    pub paths: ConfigPaths,
    pub config: Config,
    pub session: Session,
    pub controller: ReconciliationController<DialpadClient>,
}

impl Roster {
    /// Build from the files under `paths`. Fails with `NoSession` if none is stored.
    pub fn open(paths: &ConfigPaths, failure_policy: FailurePolicy) -> CliResult<Self> {
        let config = Config::load(paths)?;
        let session = Session::require(paths)?;
        Self::from_parts(paths.clone(), config, session, failure_policy)
    }

    pub fn from_parts(
        paths: ConfigPaths,
        config: Config,
        session: Session,
        failure_policy: FailurePolicy,
    ) -> CliResult<Self> {
        debug!(api_url = %config.api_url, user_id = %session.user_id, "Opening roster");
        let client = DialpadClient::new(&config.api_url, &session.headers, config.timeout())?;
        let controller = ReconciliationController::new(client, session.user_id.clone())
            .with_settings(config.to_engine_settings(failure_policy))
            .with_denylist(config.denylisted_shift_prefixes.clone());

        Ok(Self {
            paths,
            config,
            session,
            controller,
        })
    }

    /// Fetch the catalog and user around the persisted selection.
    pub async fn load_state(&self) -> CliResult<AppState> {
        let selection = Selection::load(&self.paths)?;
        let state = self
            .controller
            .bootstrap(selection.checked_call_center_ids)
            .await?;
        Ok(state)
    }

    pub fn save_selection(&self, state: &AppState) -> CliResult<()> {
        Selection::new(state.checked.clone()).save(&self.paths)
    }

    /// Name as shown to the operator, with its shift time when it has one.
    pub fn display_name(&self, name: &str) -> String {
        self.controller
            .suffix_table()
            .display_name_for(name, self.controller.denylist())
    }
}
