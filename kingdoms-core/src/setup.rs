//! Capital placement
//!
//! A capital may only be founded on a hex whose entire ring is friendly,
//! passable and empty: all six neighbors must exist and qualify.

use crate::board::{Board, Hex, Player};

/// Neighbors a capital site needs
const REQUIRED_NEIGHBORS: usize = 6;

/// Whether `player` may found a capital on `hex`
pub fn is_valid_capital_position(board: &Board, hex: Hex, player: Player) -> bool {
    let Some(center) = board.get(hex) else {
        return false;
    };
    if !center.is_owned_by(player) {
        return false;
    }

    let qualifying = hex
        .neighbors()
        .into_iter()
        .filter_map(|n| board.get(n))
        .filter(|t| t.terrain.is_passable() && t.unit.is_none() && t.is_owned_by(player))
        .count();

    qualifying == REQUIRED_NEIGHBORS
}

/// Every hex where `player` may found a capital, in board order
pub fn valid_capital_positions(board: &Board, player: Player) -> Vec<Hex> {
    board
        .tiles()
        .iter()
        .filter(|t| t.is_owned_by(player))
        .map(|t| t.hex)
        .filter(|&hex| is_valid_capital_position(board, hex, player))
        .collect()
}
