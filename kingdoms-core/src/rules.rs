//! Placement and movement legality

use crate::board::{Board, Hex, HexTile, Player};

/// A unit may be placed on an empty, passable hex of the player's territory
pub fn is_valid_placement(tile: &HexTile, player: Player) -> bool {
    tile.is_owned_by(player) && tile.unit.is_none() && tile.terrain.is_passable()
}

/// A unit may move to any empty, passable hex within its movement distance
pub fn is_valid_move(from: &HexTile, to: &HexTile) -> bool {
    let Some(unit) = &from.unit else {
        return false;
    };
    to.unit.is_none()
        && to.terrain.is_passable()
        && from.hex.distance_to(to.hex) <= unit.movement
}

/// Every hex the unit on `from` can reach this phase
pub fn valid_destinations(board: &Board, from: Hex) -> Vec<Hex> {
    let Some(origin) = board.get(from) else {
        return Vec::new();
    };
    board
        .tiles()
        .iter()
        .filter(|to| is_valid_move(origin, to))
        .map(|to| to.hex)
        .collect()
}

/// Every hex where `player` may deploy a unit
pub fn valid_placements(board: &Board, player: Player) -> Vec<Hex> {
    board
        .tiles()
        .iter()
        .filter(|t| is_valid_placement(t, player))
        .map(|t| t.hex)
        .collect()
}
