//! Session management commands

use crate::config::ConfigPaths;
use crate::error::CliResult;
use crate::output::{print_info, print_key_value, print_success};
use crate::store::{parse_header, Session};
use ccroster_core::UserId;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Store the operator id and request headers
    Set(SetArgs),
    /// Show the stored session with header values masked
    Show(ShowArgs),
    /// Delete the stored session
    Clear,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Operator whose memberships are managed
    #[arg(long)]
    pub user_id: UserId,

    /// Request header as name:value (repeatable)
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SessionArgs, paths: &ConfigPaths) -> CliResult<()> {
    match args.command {
        SessionCommands::Set(a) => execute_set(a, paths),
        SessionCommands::Show(a) => execute_show(a, paths),
        SessionCommands::Clear => execute_clear(paths),
    }
}

fn execute_set(args: SetArgs, paths: &ConfigPaths) -> CliResult<()> {
    let headers = args
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<CliResult<BTreeMap<_, _>>>()?;

    let session = Session::new(args.user_id, headers);
    session.save(paths)?;
    print_success(&format!(
        "Session saved for user {} with {} header(s)",
        session.user_id,
        session.headers.len()
    ));
    Ok(())
}

fn execute_show(args: ShowArgs, paths: &ConfigPaths) -> CliResult<()> {
    let session = Session::require(paths)?;
    let headers = session.redacted_headers();

    if args.json {
        let headers: BTreeMap<_, _> = headers.into_iter().collect();
        let view = serde_json::json!({
            "user_id": session.user_id,
            "headers": headers,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_key_value("User", session.user_id.as_str());
    if headers.is_empty() {
        print_key_value("Headers", "(none)");
    }
    for (name, value) in headers {
        print_key_value(&name, &value);
    }
    Ok(())
}

fn execute_clear(paths: &ConfigPaths) -> CliResult<()> {
    Session::delete(paths)?;
    print_info("Session cleared");
    Ok(())
}
