//! Board and capitals commands - inspect generated boards

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use kingdoms_core::{
    initialize_board, valid_capital_positions, Board, HexTile, Owner, Player, Terrain,
};

use crate::load_config;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Board width in hexes
    #[arg(long, default_value = "15")]
    pub width: u32,

    /// Board height in hexes
    #[arg(long, default_value = "11")]
    pub height: u32,

    /// Output the tiles as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CapitalsArgs {
    /// Player to list sites for (1 or 2)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub player: u8,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn run_board(args: BoardArgs) -> Result<()> {
    let board = initialize_board(args.width, args.height);
    tracing::info!("Generated {}x{} board with {} hexes", args.width, args.height, board.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", render_board(&board));
        println!();
        println!("{}", summarize(&board));
    }
    Ok(())
}

pub fn run_capitals(args: CapitalsArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let player = if args.player == 2 { Player::Player2 } else { Player::Player1 };
    let board = initialize_board(config.width, config.height);

    let sites = valid_capital_positions(&board, player);
    tracing::info!("{} capital sites for {}", sites.len(), player);
    for hex in sites {
        println!("{}", hex);
    }
    Ok(())
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Text map, one line per row. Odd rows shift half a cell.
pub fn render_board(board: &Board) -> String {
    let column = |tile: &HexTile| 2 * tile.hex.q() + tile.hex.r();
    let min_column = board.tiles().iter().map(column).min().unwrap_or(0);

    let mut rows: BTreeMap<i32, Vec<&HexTile>> = BTreeMap::new();
    for tile in board.tiles() {
        rows.entry(tile.hex.r()).or_default().push(tile);
    }

    let mut out = String::new();
    for tiles in rows.values_mut() {
        tiles.sort_by_key(|t| t.hex.q());
        let mut line = String::new();
        for &tile in tiles.iter() {
            let offset = (column(tile) - min_column) as usize;
            while line.len() < offset {
                line.push(' ');
            }
            line.push(glyph(tile));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// One character per hex: units first, then terrain, then territory
pub fn glyph(tile: &HexTile) -> char {
    if let Some(unit) = &tile.unit {
        return if unit.is_capital() { '@' } else { 'u' };
    }
    match tile.terrain {
        Terrain::Mountain => '^',
        Terrain::Forest => '%',
        Terrain::River => '~',
        Terrain::Magic => '*',
        Terrain::Plain => match tile.owner {
            Owner::Player1 => '1',
            Owner::Player2 => '2',
            Owner::Neutral => '.',
        },
    }
}

fn summarize(board: &Board) -> String {
    let count = |terrain: Terrain| board.tiles().iter().filter(|t| t.terrain == terrain).count();
    format!(
        "hexes: {}  player1: {}  player2: {}  neutral: {}  mountains: {}  forests: {}  river: {}",
        board.len(),
        board.territory_size(Owner::Player1),
        board.territory_size(Owner::Player2),
        board.territory_size(Owner::Neutral),
        count(Terrain::Mountain),
        count(Terrain::Forest),
        count(Terrain::River),
    )
}
