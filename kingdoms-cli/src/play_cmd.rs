//! Play command - replay an intent script through the game store
//!
//! - run(): load config and script, replay, report
//! - report(): text or JSON summary of the final snapshot

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use kingdoms_core::{GameState, GameStore, Player};

use crate::board_cmd::render_board;
use crate::load_config;
use crate::script::{self, Replay};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Intent script JSON file
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of log lines to print
    #[arg(long, default_value = "20")]
    pub tail: usize,

    /// Output the replay and final state as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlayReport<'a> {
    replay: &'a Replay,
    revision: u64,
    state: &'a GameState,
}

// ============================================================================
// COMMAND
// ============================================================================

pub fn run(args: PlayArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let intents = script::load_script(&args.script)?;

    tracing::info!(
        "Replaying {} intents from {} ({} vs {})",
        intents.len(),
        args.script.display(),
        config.player1_nation,
        config.player2_nation
    );

    let mut store = GameStore::new(&config);
    let replay = script::replay(&mut store, &intents);

    report(&store, &replay, &args)
}

fn report(store: &GameStore, replay: &Replay, args: &PlayArgs) -> Result<()> {
    let state = store.state();

    if args.json {
        let report = PlayReport {
            replay,
            revision: store.revision(),
            state,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render_board(state.board()));
    println!();
    println!("{}", status_line(state));
    for player in [Player::Player1, Player::Player2] {
        let p = state.player(player);
        println!(
            "  {} ({}): {} {}",
            player,
            p.nation,
            p.resources[p.nation.primary_resource()],
            p.nation.primary_resource()
        );
    }
    println!("Steps: {} accepted, {} rejected", replay.accepted, replay.rejected);
    println!();
    for line in store.log_tail(args.tail) {
        println!("{}", line);
    }
    Ok(())
}

/// One-line summary of where the game stands
pub fn status_line(state: &GameState) -> String {
    match state.outcome() {
        Some(victory) => format!(
            "Game over after turn {}: {} wins ({:?})",
            state.turn(),
            victory.winner,
            victory.reason
        ),
        None => format!(
            "Turn {} (round {}): {} - {}",
            state.turn(),
            state.round(),
            state.active_player().nation,
            state.current_phase()
        ),
    }
}
