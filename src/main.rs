mod commands;

use std::error::Error;

use clap::{Command, command};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(commands::cmus::cli())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // stdout belongs to the bar
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("getinfo=warn,gi_core=warn,gi_cmus=warn")),
        )
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("cmus", args)) => commands::cmus::exec(args).await,
        _ => unreachable!("subcommand is required"),
    }
}
