//! Apply the selection to the operator's memberships

use crate::commands::status::print_status;
use crate::config::ConfigPaths;
use crate::context::Roster;
use crate::error::CliResult;
use crate::output::{print_info, print_success, print_warning};
use crate::progress::create_spinner;
use ccroster_client::{Direction, FailurePolicy};
use clap::Args;

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Show the calls that would be made without making them
    #[arg(long)]
    pub dry_run: bool,

    /// Skip calls not yet dispatched once one fails
    #[arg(long)]
    pub cancel_on_failure: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AssignArgs {
    fn failure_policy(&self) -> FailurePolicy {
        if self.cancel_on_failure {
            FailurePolicy::CancelPending
        } else {
            FailurePolicy::RunToCompletion
        }
    }
}

pub async fn execute(args: AssignArgs, paths: &ConfigPaths) -> CliResult<()> {
    let roster = Roster::open(paths, args.failure_policy())?;
    let mut state = roster.load_state().await?;

    if args.dry_run {
        let plan = roster.controller.plan(&state);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else if plan.is_empty() {
            print_info("Nothing to do: memberships match the selection");
        } else {
            for call in &plan {
                let sign = match call.direction {
                    Direction::Add => '+',
                    Direction::Remove => '-',
                };
                let name = state
                    .catalog
                    .find(&call.group_id)
                    .map(|r| roster.display_name(&r.display_name))
                    .unwrap_or_else(|| call.group_id.to_string());
                println!("  {sign} {name} ({}) at +{}ms", call.group_id, call.delay.as_millis());
            }
            print_info(&format!("(dry-run) {} calls would be made", plan.len()));
        }
        return Ok(());
    }

    if state.is_clean() {
        print_info("Nothing to do: memberships match the selection");
        return Ok(());
    }

    let diff = state.diff();
    let spinner = create_spinner(&format!(
        "Adding {} and removing {} call centers...",
        diff.to_add.len(),
        diff.to_remove.len()
    ));
    let result = roster.controller.assign(&mut state).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            if !args.json {
                print_success(&format!(
                    "Added {} and removed {} call centers",
                    summary.added, summary.removed
                ));
            }
            print_status(&roster, &state, args.json)
        }
        Err(e) => {
            // The refreshed state shows what actually landed
            if !args.json {
                print_warning("Some membership changes did not apply");
                print_status(&roster, &state, false)?;
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_policy_flag() {
        let args = AssignArgs {
            dry_run: false,
            cancel_on_failure: true,
            json: false,
        };
        assert_eq!(args.failure_policy(), FailurePolicy::CancelPending);

        let args = AssignArgs {
            cancel_on_failure: false,
            ..args
        };
        assert_eq!(args.failure_policy(), FailurePolicy::RunToCompletion);
    }
}
