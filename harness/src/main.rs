use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use harness::{cli, logging};

#[derive(Parser)]
#[command(
    name = "suitesync",
    version,
    about = "Synchronize a remote test catalog with a local execution suite"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sync a run and print its section buckets.
    List {
        run_name: String,
        #[arg(long, default_value = "plan.toml")]
        plan: PathBuf,
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,
    },
    /// Sync and execute a run, submitting results to the catalog.
    Run {
        run_name: String,
        #[arg(long, default_value = "plan.toml")]
        plan: PathBuf,
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,
        #[arg(long, default_value = "reports")]
        reports: PathBuf,
    },
    /// Remove report artifacts.
    Clean {
        #[arg(long, default_value = "reports")]
        reports: PathBuf,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::List {
            run_name,
            plan,
            catalog,
        } => cli::list_run(&plan, &catalog, &run_name),
        Command::Run {
            run_name,
            plan,
            catalog,
            reports,
        } => cli::run_by_name(&plan, &catalog, &reports, &run_name),
        Command::Clean { reports } => cli::clean(&reports),
    }
}
