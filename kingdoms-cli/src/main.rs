//! Kingdoms CLI - Command-line interface
//!
//! Commands:
//! - board: Generate a board and print it
//! - capitals: List valid capital sites
//! - play: Replay an intent script

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kingdoms_cli::{board_cmd, play_cmd};

#[derive(Parser)]
#[command(name = "kingdoms")]
#[command(about = "Kingdoms hex territory rule engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board and print it
    Board(board_cmd::BoardArgs),
    /// List valid capital sites for a player
    Capitals(board_cmd::CapitalsArgs),
    /// Replay an intent script through the game store
    Play(play_cmd::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs on stderr, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Board(args) => board_cmd::run_board(args),
        Commands::Capitals(args) => board_cmd::run_capitals(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}
