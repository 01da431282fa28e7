use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "intake-replay", about = "Replay assessment transcripts and aggregate snapshots")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a session with answers from a transcript and print its snapshot
    Simulate(commands::simulate::SimulateArgs),
    /// Aggregate stored snapshot files for one client
    Aggregate(commands::aggregate::AggregateArgs),
    /// Summarize a question bank
    Bank(commands::bank::BankArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout stays machine-readable.
    if cli.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Aggregate(args) => commands::aggregate::run(args),
        Commands::Bank(args) => commands::bank::run(args),
    }
}
