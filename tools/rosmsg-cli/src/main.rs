mod commands;
mod provider;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{canonical::CanonicalArgs, deps::DepsArgs, parse::ParseArgs};
use tracing::Level;

#[derive(Parser)]
#[command(name = "rosmsg", about = "Parse and canonicalize ROS message definitions")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print parsed definitions as JSON
    Parse(ParseArgs),
    /// Print the canonical text of a definition
    Canonical(CanonicalArgs),
    /// Bundle a .msg file with every definition it depends on
    Deps(DepsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse(args) => args.run(),
        Commands::Canonical(args) => args.run(),
        Commands::Deps(args) => args.run(),
    }
}
