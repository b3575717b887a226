//! Command-line interface for the Stopover route planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod files;
mod plan;
mod resolve;

pub use error::CliError;

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_PLAN_STORE: &str = "store";
pub(crate) const ARG_PLAN_ORIGIN: &str = "origin";
pub(crate) const ENV_PLAN_REQUEST: &str = "STOPOVER_CMDS_PLAN_REQUEST";
pub(crate) const ARG_RESOLVE_QUERY: &str = "query";
pub(crate) const ENV_RESOLVE_QUERY: &str = "STOPOVER_CMDS_RESOLVE_QUERY";

/// Run the Stopover CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Any [`CliError`]; the binary prints it as `stopover: <message>` and
/// exits nonzero.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Resolve(args) => resolve::run_resolve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "stopover",
    about = "Plan a short multi-stop travel route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequence destinations into a visiting order.
    Plan(plan::PlanArgs),
    /// Resolve a place name to a coordinate.
    Resolve(resolve::ResolveArgs),
}
