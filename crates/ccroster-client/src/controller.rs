//! Reconciliation controller.
//!
//! Owns the service handle and the classification inputs, and drives the
//! `Idle → Assigning → Idle` cycle over an explicit [`AppState`].

use crate::engine::{ApplySummary, EngineSettings, MembershipDiffEngine, PlannedCall};
use crate::error::ClientResult;
use crate::service::MembershipService;
use crate::state::{AppState, UserData};
use ccroster_core::{classify, sort_by_display_name, GroupId, ShiftSuffixTable, UserId};
use std::collections::BTreeSet;
use tracing::{info, warn};

pub struct ReconciliationController<S> {
    service: S,
    user_id: UserId,
    settings: EngineSettings,
    table: ShiftSuffixTable,
    denylist: Vec<String>,
}

impl<S: MembershipService> ReconciliationController<S> {
    pub fn new(service: S, user_id: UserId) -> Self {
        Self {
            service,
            user_id,
            settings: EngineSettings::default(),
            table: ShiftSuffixTable::default(),
            denylist: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_suffix_table(mut self, table: ShiftSuffixTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn suffix_table(&self) -> &ShiftSuffixTable {
        &self.table
    }

    pub fn denylist(&self) -> &[String] {
        &self.denylist
    }

    pub fn engine(&self) -> MembershipDiffEngine<'_, S> {
        MembershipDiffEngine::new(&self.service, self.settings.clone())
    }

    /// Calls an assign would make from `state`, without making them.
    pub fn plan(&self, state: &AppState) -> Vec<PlannedCall> {
        self.engine().plan(&state.diff())
    }

    /// Fetch the user profile.
    async fn fetch_user(&self) -> ClientResult<UserData> {
        let profile = self.service.get_user(&self.user_id).await?;
        Ok(UserData::from(profile))
    }

    /// Overwrite the "have" set. On failure `state` is left untouched.
    pub async fn refresh_user(&self, state: &mut AppState) -> ClientResult<()> {
        let user = self.fetch_user().await?;
        info!(
            user_id = %self.user_id,
            memberships = user.call_center_ids.len(),
            "Refreshed user"
        );
        *state = std::mem::take(state).with_user(user);
        Ok(())
    }

    /// Rebuild the catalog from the group list. On failure `state` is left untouched.
    pub async fn refresh_catalog(&self, state: &mut AppState) -> ClientResult<()> {
        let mut records = self.service.list_groups().await?;
        sort_by_display_name(&mut records);
        let catalog = classify(&records, &self.table, &self.denylist);
        info!(
            standalone = catalog.standalone.len(),
            clusters = catalog.clusters.len(),
            "Refreshed call center catalog"
        );
        *state = std::mem::take(state).with_catalog(catalog);
        Ok(())
    }

    /// Build a fresh state around a persisted selection.
    pub async fn bootstrap(&self, checked: BTreeSet<GroupId>) -> ClientResult<AppState> {
        let mut state = AppState::new(checked);
        self.refresh_catalog(&mut state).await?;
        self.refresh_user(&mut state).await?;
        Ok(state)
    }

    /// Apply the current diff, then refresh the "have" set whatever happened.
    ///
    /// Returns the apply error if there was one, else the refresh error.
    /// `is_assigning` is always cleared before returning.
    pub async fn assign(&self, state: &mut AppState) -> ClientResult<ApplySummary> {
        let (assigning, diff) = std::mem::take(state).begin_assign();
        *state = assigning;

        let applied = self.engine().apply(&self.user_id, &diff).await;

        let (user, refresh_error) = match self.fetch_user().await {
            Ok(user) => (Some(user), None),
            Err(error) => {
                warn!(user_id = %self.user_id, error = %error, "Failed to refresh user after assign");
                (None, Some(error))
            }
        };
        *state = std::mem::take(state).finish_assign(user);

        let summary = applied?;
        match refresh_error {
            Some(error) => Err(error),
            None => Ok(summary),
        }
    }
}
