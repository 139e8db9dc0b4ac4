//! gqltest - smoke tests for the GraphQL user service
//!
//! Exercises the user API through the gateway and directly, printing a
//! line per check and exiting non-zero if any check failed.

use clap::Parser;
use gqltest::commands::{Commands, ConnectionArgs};
use gqltest::{cli, common::logging};

#[derive(Parser)]
#[command(name = "gqltest", about = "GraphQL user service smoke tester")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Log request and response details
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run);

    match cli::dispatch(command, cli.connection.into()).await {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
