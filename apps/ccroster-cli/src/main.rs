//! ccroster - call center roster management for Dialpad operators

use ccroster_cli::commands::{self, select::SelectionChange};
use ccroster_cli::config::ConfigPaths;
use ccroster_cli::error::CliResult;
use ccroster_cli::logging::init_logging;
use clap::{ArgAction, Parser, Subcommand};

/// ccroster - Call center roster management
#[derive(Parser)]
#[command(name = "ccroster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored operator session
    Session(commands::session::SessionArgs),

    /// List call centers and shift columns
    List(commands::list::ListArgs),

    /// Show memberships, selection and pending changes
    Status(commands::status::StatusArgs),

    /// Select call centers
    Check(commands::select::IdsArgs),

    /// Deselect call centers
    Uncheck(commands::select::IdsArgs),

    /// Select every call center
    CheckAll,

    /// Clear the selection
    CheckNone,

    /// Reset the selection to the current memberships
    CheckReset,

    /// Select exactly the given shift columns
    Shifts(commands::select::ShiftsArgs),

    /// Apply the selection
    Assign(commands::assign::AssignArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let paths = ConfigPaths::new()?;

    match cli.command {
        Commands::Session(args) => commands::session::execute(args, &paths),
        Commands::List(args) => commands::list::execute(args, &paths).await,
        Commands::Status(args) => commands::status::execute(args, &paths).await,
        Commands::Check(args) => {
            commands::select::execute(SelectionChange::Check(args.ids), &paths).await
        }
        Commands::Uncheck(args) => {
            commands::select::execute(SelectionChange::Uncheck(args.ids), &paths).await
        }
        Commands::CheckAll => commands::select::execute(SelectionChange::All, &paths).await,
        Commands::CheckNone => commands::select::execute(SelectionChange::None, &paths).await,
        Commands::CheckReset => commands::select::execute(SelectionChange::Reset, &paths).await,
        Commands::Shifts(args) => commands::select::execute(args.into(), &paths).await,
        Commands::Assign(args) => commands::assign::execute(args, &paths).await,
    }
}
