//! Reconciliation status

use crate::config::ConfigPaths;
use crate::context::Roster;
use crate::error::CliResult;
use crate::output::{print_key_value, print_success, print_warning};
use ccroster_client::{AppState, FailurePolicy};
use ccroster_core::GroupId;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub display_name: Option<String>,
    pub primary_email: Option<String>,
    pub have: usize,
    pub want: usize,
    pub to_add: BTreeSet<GroupId>,
    pub to_remove: BTreeSet<GroupId>,
    pub checked_shifts: Vec<String>,
    pub is_clean: bool,
}

impl StatusView {
    pub fn build(state: &AppState) -> Self {
        let diff = state.diff();
        Self {
            display_name: state.user.display_name.clone(),
            primary_email: state.user.primary_email.clone(),
            have: state.have().len(),
            want: state.want().len(),
            is_clean: diff.is_empty(),
            to_add: diff.to_add,
            to_remove: diff.to_remove,
            checked_shifts: state.checked_shift_suffixes(),
        }
    }
}

pub async fn execute(args: StatusArgs, paths: &ConfigPaths) -> CliResult<()> {
    let roster = Roster::open(paths, FailurePolicy::default())?;
    let state = roster.load_state().await?;
    print_status(&roster, &state, args.json)
}

/// Print the operator summary and pending changes.
pub fn print_status(roster: &Roster, state: &AppState, json: bool) -> CliResult<()> {
    let view = StatusView::build(state);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_key_value("User", view.display_name.as_deref().unwrap_or("(unknown)"));
    print_key_value("Email", view.primary_email.as_deref().unwrap_or("-"));
    print_key_value("Member of", &format!("{} call centers", view.have));
    print_key_value("Selected", &format!("{} call centers", view.want));
    if !view.checked_shifts.is_empty() {
        print_key_value("Shifts", &view.checked_shifts.join(", "));
    }

    if view.is_clean {
        print_success("Memberships match the selection");
        return Ok(());
    }

    let describe = |id: &GroupId| match state.catalog.find(id) {
        Some(record) => format!("{} ({})", roster.display_name(&record.display_name), id),
        None => id.to_string(),
    };
    println!();
    for id in &view.to_add {
        println!("  + {}", describe(id));
    }
    for id in &view.to_remove {
        println!("  - {}", describe(id));
    }
    print_warning(&format!(
        "{} to add, {} to remove. Run 'ccroster assign' to apply.",
        view.to_add.len(),
        view.to_remove.len()
    ));
    Ok(())
}
