//! Selection commands: check, uncheck, bulk selection and shift columns

use crate::config::ConfigPaths;
use crate::context::Roster;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success};
use ccroster_client::{AppState, FailurePolicy};
use ccroster_core::GroupId;
use clap::Args;

#[derive(Args, Debug)]
pub struct IdsArgs {
    /// Call center ids
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<GroupId>,
}

#[derive(Args, Debug)]
pub struct ShiftsArgs {
    /// Shift suffixes to select (e.g. A C); every other shift column is cleared
    #[arg(required_unless_present = "none", conflicts_with = "none")]
    pub suffixes: Vec<String>,

    /// Clear every shift column
    #[arg(long)]
    pub none: bool,
}

/// One selection mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Check(Vec<GroupId>),
    Uncheck(Vec<GroupId>),
    All,
    None,
    Reset,
    Shifts(Vec<String>),
}

impl From<ShiftsArgs> for SelectionChange {
    fn from(args: ShiftsArgs) -> Self {
        if args.none {
            SelectionChange::Shifts(Vec::new())
        } else {
            SelectionChange::Shifts(args.suffixes)
        }
    }
}

/// Apply `change` to `state`, rejecting ids and suffixes the catalog does not know.
pub fn apply_change(state: AppState, change: SelectionChange) -> CliResult<AppState> {
    match change {
        SelectionChange::Check(ids) => {
            if let Some(unknown) = ids.iter().find(|id| state.catalog.find(id).is_none()) {
                return Err(CliError::Validation(format!(
                    "Unknown call center id: {unknown}"
                )));
            }
            Ok(state.check(ids))
        }
        SelectionChange::Uncheck(ids) => Ok(state.uncheck(&ids)),
        SelectionChange::All => Ok(state.check_all()),
        SelectionChange::None => Ok(state.check_none()),
        SelectionChange::Reset => Ok(state.check_reset()),
        SelectionChange::Shifts(suffixes) => {
            let known: Vec<String> = state
                .catalog
                .suffixes()
                .iter()
                .map(ToString::to_string)
                .collect();
            if let Some(unknown) = suffixes.iter().find(|s| !known.contains(s)) {
                return Err(CliError::Validation(format!(
                    "No shift cluster has suffix '{unknown}'. Known suffixes: {}",
                    known.join(", ")
                )));
            }
            Ok(state.set_checked_shift_suffixes(&suffixes))
        }
    }
}

pub async fn execute(change: SelectionChange, paths: &ConfigPaths) -> CliResult<()> {
    let roster = Roster::open(paths, FailurePolicy::default())?;
    let state = roster.load_state().await?;
    let before = state.checked.clone();

    let state = apply_change(state, change)?;
    if state.checked == before {
        print_info("Selection unchanged");
        return Ok(());
    }

    roster.save_selection(&state)?;
    let diff = state.diff();
    print_success(&format!(
        "{} call centers selected ({} to add, {} to remove)",
        state.checked.len(),
        diff.to_add.len(),
        diff.to_remove.len()
    ));
    Ok(())
}
