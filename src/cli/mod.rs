//! dialex CLI - extract dialogue from level-editor JSON exports

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "dialex")]
#[command(about = "dialex: dialogue extraction for level-editor JSON exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the dialex CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
