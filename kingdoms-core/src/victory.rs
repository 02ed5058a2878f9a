//! Terminal conditions, checked once per turn at the END phase

use serde::Serialize;

use crate::board::{Board, Player};
use crate::game::GameState;
use crate::units::Nation;

/// Central-row hexes a player must hold to dominate the border
pub const DOMINATION_HEXES: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryReason {
    CapitalDestroyed,
    BorderDomination,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Victory {
    pub winner: Player,
    pub reason: VictoryReason,
}

/// Check both conditions in order; the first match wins
pub fn evaluate(state: &GameState) -> Option<Victory> {
    for player in [Player::Player1, Player::Player2] {
        if capital_destroyed(state, player) {
            return Some(Victory {
                winner: player.opponent(),
                reason: VictoryReason::CapitalDestroyed,
            });
        }
    }

    let needed = domination_threshold(state.board())?;
    for player in [Player::Player1, Player::Player2] {
        let nation = state.player(player).nation;
        if border_control(state.board(), player, nation) >= needed {
            return Some(Victory {
                winner: player,
                reason: VictoryReason::BorderDomination,
            });
        }
    }

    None
}

/// A founded capital is destroyed once the live board no longer holds it
/// alive at its recorded hex
pub fn capital_destroyed(state: &GameState, player: Player) -> bool {
    if state.player(player).capital_hex.is_none() {
        return false;
    }
    state.capital(player).map_or(true, |unit| !unit.is_alive())
}

/// Central-row hexes that count for `player`: owned by the player, or
/// occupied by a unit of the player's nation
pub fn border_control(board: &Board, player: Player, nation: Nation) -> usize {
    board
        .central_row()
        .filter(|t| t.is_owned_by(player) || t.unit.as_ref().is_some_and(|u| u.belongs_to(nation)))
        .count()
}

/// Hexes needed to dominate; the whole row when it is shorter than six.
/// `None` on a board without a central row.
pub fn domination_threshold(board: &Board) -> Option<usize> {
    let row = board.central_row().count();
    (row > 0).then(|| row.min(DOMINATION_HEXES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initialize_board, Hex, Owner};
    use crate::units::get_template;

    #[test]
    fn test_threshold() {
        assert_eq!(domination_threshold(&initialize_board(15, 11)), Some(6));
        assert_eq!(domination_threshold(&initialize_board(3, 3)), Some(3));
        assert_eq!(domination_threshold(&Board::default()), None);
    }

    #[test]
    fn test_border_control_counts_units_or_ownership() {
        let mut board = initialize_board(15, 11);
        let infantry = get_template("altaria-infantry").unwrap().instantiate();
        for q in 0..3 {
            board.get_mut(Hex::new(q, 0)).unwrap().unit = Some(infantry.clone());
        }
        // A neutral-row hex handed to player1 counts through ownership alone
        board.get_mut(Hex::new(-1, 0)).unwrap().owner = Owner::Player1;
        assert_eq!(border_control(&board, Player::Player1, Nation::Altaria), 4);
        assert_eq!(border_control(&board, Player::Player2, Nation::Cartasia), 0);
    }

    #[test]
    fn test_enemy_units_do_not_count() {
        let mut board = initialize_board(15, 11);
        let raider = get_template("cartasia-infantry").unwrap().instantiate();
        board.get_mut(Hex::new(0, 0)).unwrap().unit = Some(raider);
        assert_eq!(border_control(&board, Player::Player1, Nation::Altaria), 0);
        assert_eq!(border_control(&board, Player::Player2, Nation::Cartasia), 1);
    }
}
