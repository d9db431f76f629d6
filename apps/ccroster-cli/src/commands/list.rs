//! Call center listing

use crate::config::ConfigPaths;
use crate::context::Roster;
use crate::error::CliResult;
use crate::output::{marker, print_header, truncate};
use ccroster_client::{AppState, FailurePolicy};
use ccroster_core::{GroupId, GroupRecord, ShiftSuffixTable};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallCenterView {
    pub id: GroupId,
    pub name: String,
    pub display_name: String,
    pub member: bool,
    pub checked: bool,
}

/// One shift column across every cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftView {
    pub suffix: String,
    pub label: Option<String>,
    pub member: bool,
    pub checked: bool,
    pub call_centers: Vec<CallCenterView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub standalone: Vec<CallCenterView>,
    pub shifts: Vec<ShiftView>,
}

impl RosterView {
    pub fn build(state: &AppState, table: &ShiftSuffixTable, denylist: &[String]) -> Self {
        let call_center = |record: &GroupRecord| CallCenterView {
            id: record.id.clone(),
            name: record.display_name.clone(),
            display_name: table.display_name_for(&record.display_name, denylist),
            member: state.is_member(&record.id),
            checked: state.is_checked(&record.id),
        };

        let standalone = state.catalog.standalone.iter().map(call_center).collect();
        let shifts = state
            .catalog
            .suffixes()
            .into_iter()
            .map(|suffix| {
                let suffix = suffix.as_str();
                ShiftView {
                    suffix: suffix.to_string(),
                    label: table
                        .position(suffix)
                        .and_then(|p| table.label_at(p))
                        .map(str::to_string),
                    member: state.is_shift_member(suffix),
                    checked: state.is_shift_checked(suffix),
                    call_centers: state
                        .catalog
                        .members_for_suffix(suffix)
                        .into_iter()
                        .map(call_center)
                        .collect(),
                }
            })
            .collect();

        Self { standalone, shifts }
    }
}

pub async fn execute(args: ListArgs, paths: &ConfigPaths) -> CliResult<()> {
    let roster = Roster::open(paths, FailurePolicy::default())?;
    let state = roster.load_state().await?;
    let view = RosterView::build(
        &state,
        roster.controller.suffix_table(),
        roster.controller.denylist(),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_roster(&view);
    }
    Ok(())
}

fn print_row(cc: &CallCenterView) {
    println!(
        "  {} {} {:<20} {}",
        marker(cc.member, '*'),
        marker(cc.checked, 'x'),
        cc.id,
        truncate(&cc.display_name, 56)
    );
}

fn print_roster(view: &RosterView) {
    if view.standalone.is_empty() && view.shifts.is_empty() {
        println!("No call centers found.");
        return;
    }

    println!("  * member   x selected");

    if !view.standalone.is_empty() {
        print_header("Call centers");
        view.standalone.iter().for_each(print_row);
    }

    for shift in &view.shifts {
        let title = match &shift.label {
            Some(label) => format!("Shift {} {}", shift.suffix, label),
            None => format!("Shift {}", shift.suffix),
        };
        print_header(&format!(
            "[{}{}] {}",
            marker(shift.member, '*'),
            marker(shift.checked, 'x'),
            title
        ));
        shift.call_centers.iter().for_each(print_row);
    }
}
