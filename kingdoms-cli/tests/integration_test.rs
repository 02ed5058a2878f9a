//! Integration tests for the Kingdoms engine
//!
//! Tests the full stack: scripts, the game store, the phase machine and the
//! binary itself

use std::process::Command;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use kingdoms_cli::board_cmd::render_board;
use kingdoms_cli::play_cmd::status_line;
use kingdoms_cli::script::{parse_script, replay, Intent};
use kingdoms_core::{
    GameConfig, GameStore, Hex, Nation, Phase, Player, RejectionClass, VictoryReason,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

const BORDER_RUSH: &str = include_str!("../../demos/border_rush.json");
const SKIRMISH: &str = include_str!("../../demos/skirmish.json");

fn setup_intents() -> Vec<Intent> {
    vec![
        Intent::PlaceCapital { at: [0, -3] },
        Intent::PlaceCapital { at: [0, 3] },
    ]
}

fn kingdoms() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kingdoms"))
}

// ============================================================================
// SCRIPTED GAMES
// ============================================================================

#[test]
fn test_border_rush_wins_by_domination() {
    let intents = parse_script(BORDER_RUSH).unwrap();
    let mut store = GameStore::default();
    let result = replay(&mut store, &intents);

    assert_eq!(result.rejected, 0, "{:?}", result.steps.iter().find(|s| s.rejection.is_some()));
    let state = store.state();
    assert!(state.is_game_over());
    assert_eq!(state.winner(), Some(Player::Player1));
    assert_eq!(state.outcome().map(|v| v.reason), Some(VictoryReason::BorderDomination));
    assert_eq!(state.turn(), 1);
    assert!(status_line(state).starts_with("Game over after turn 1: player1 wins"));

    let p1 = state.player(Player::Player1);
    assert_eq!(p1.units_placed, 0, "counters reset at END");
    assert_eq!(p1.resources.faith, 1);
    assert!(state.board().get(Hex::new(2, -3)).unwrap().building.is_some());
}

#[test]
fn test_nothing_accepted_after_victory() {
    let mut intents = parse_script(BORDER_RUSH).unwrap();
    intents.push(Intent::AdvancePhase);
    intents.push(Intent::PlaceUnit { at: [1, -3], template: "altaria-mage".into() });

    let mut store = GameStore::default();
    let result = replay(&mut store, &intents);
    let log_len = store.state().log().len();

    assert_eq!(result.rejected, 2);
    assert_eq!(result.steps.last().unwrap().rejection.as_deref(), Some("The game is over"));
    // A finished game does not record further rejections
    let again = replay(&mut store, &[Intent::AdvancePhase]);
    assert_eq!(again.rejected, 1);
    assert_eq!(store.state().log().len(), log_len);
}

#[test]
fn test_skirmish_script() {
    let intents = parse_script(SKIRMISH).unwrap();
    let mut store = GameStore::default();
    let result = replay(&mut store, &intents);

    // Cartasia cannot deploy into Altaria's territory
    assert_eq!(result.rejected, 1);
    assert_eq!(
        result.steps[8].rejection.as_deref(),
        Some("Cannot place at 0,-2,2: not player2's territory")
    );

    let state = store.state();
    assert_eq!(state.current_player(), Player::Player2);
    assert_eq!(state.current_phase(), Phase::End);
    assert!(!state.is_game_over());

    // The archer shot from two hexes away and lost the exchange
    let center = state.board().get(Hex::new(0, 0)).unwrap();
    assert_eq!(center.unit.as_ref().map(|u| u.hit_points), Some(1));
    assert!(state.board().get(Hex::new(0, 2)).unwrap().unit.is_none());
    assert!(state.log().iter().any(|l| l == "Faith Warrior won the combat!"));
}

#[test]
fn test_phase_rejections_name_the_phase() {
    let mut intents = setup_intents();
    intents.push(Intent::MoveUnit { from: [0, -3], to: [0, -2] });
    intents.push(Intent::AdvanceTo { phase: Phase::Combat });
    intents.push(Intent::PlaceUnit { at: [0, -2], template: "altaria-infantry".into() });

    let mut store = GameStore::default();
    let result = replay(&mut store, &intents);
    assert_eq!(result.steps[2].rejection.as_deref(), Some("Cannot move units during Resource Phase"));
    assert_eq!(result.steps[4].rejection.as_deref(), Some("Cannot place units during Combat Phase"));
    assert_eq!(store.log_tail(1), ["Cannot place units during Combat Phase".to_string()]);
}

#[test]
fn test_rounds_across_turns() {
    let mut store = GameStore::default();
    replay(&mut store, &setup_intents());

    let mut seen = Vec::new();
    for _ in 0..6 {
        replay(&mut store, &[Intent::AdvanceTo { phase: Phase::Resource }]);
        let state = store.state();
        seen.push((state.current_player(), state.turn(), state.round()));
    }
    assert_eq!(
        seen,
        vec![
            (Player::Player2, 2, 1),
            (Player::Player1, 3, 2),
            (Player::Player2, 4, 2),
            (Player::Player1, 5, 3),
            (Player::Player2, 6, 3),
            (Player::Player1, 7, 4),
        ]
    );
    // 1 + 2 + 3 + 4
    assert_eq!(store.state().player(Player::Player1).resources.faith, 10);
    assert_eq!(store.state().player(Player::Player2).resources.blood, 6);
}

#[test]
fn test_income_caps_at_six() {
    let mut store = GameStore::default();
    replay(&mut store, &setup_intents());
    for _ in 0..18 {
        replay(&mut store, &[Intent::AdvanceTo { phase: Phase::Resource }]);
    }
    // Player1 is in round 10: 1 + 2 + 3 + 4 + 5 + 6 * 5
    let state = store.state();
    assert_eq!(state.round(), 10);
    assert_eq!(state.player(Player::Player1).resources.faith, 45);
    assert_eq!(state.player(Player::Player1).resource_hexes.len(), 6);
}

#[test]
fn test_custom_nations() {
    let config = GameConfig {
        player1_nation: Nation::Cartasia,
        player2_nation: Nation::Altaria,
        ..Default::default()
    };
    let mut store = GameStore::new(&config);
    let result = replay(&mut store, &setup_intents());
    assert_eq!(result.rejected, 0);
    assert_eq!(store.state().player(Player::Player1).resources.blood, 1);
    assert_eq!(
        store.state().capital(Player::Player2).map(|u| u.name.as_str()),
        Some("Divine Citadel")
    );
}

// ============================================================================
// RANDOMIZED REPLAY
// ============================================================================

fn random_script(rng: &mut ChaCha8Rng, len: usize) -> Vec<Intent> {
    const TEMPLATES: [&str; 6] = [
        "altaria-infantry",
        "altaria-archer",
        "altaria-mage",
        "cartasia-infantry",
        "cartasia-archer",
        "cartasia-mage",
    ];
    let coord = |rng: &mut ChaCha8Rng| -> [i32; 2] { [rng.gen_range(-5..=5), rng.gen_range(-5..=5)] };

    let mut intents = setup_intents();
    for _ in 0..len {
        let intent = match rng.gen_range(0..6) {
            0 | 1 => Intent::AdvancePhase,
            2 => Intent::PlaceUnit {
                at: coord(rng),
                template: TEMPLATES.choose(rng).unwrap().to_string(),
            },
            3 => Intent::MoveUnit { from: coord(rng), to: coord(rng) },
            4 => Intent::Attack { from: coord(rng), to: coord(rng) },
            _ => Intent::AdvanceTo { phase: *Phase::TURN.choose(rng).unwrap() },
        };
        intents.push(intent);
    }
    intents
}

#[test]
fn test_random_scripts_replay_identically() {
    for seed in 0..5u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let intents = random_script(&mut rng, 400);

        let mut a = GameStore::default();
        let mut b = GameStore::default();
        let ra = replay(&mut a, &intents);
        let rb = replay(&mut b, &intents);

        assert_eq!(a.state(), b.state(), "seed {}", seed);
        assert_eq!(a.revision(), b.revision());
        assert_eq!(ra.accepted + ra.rejected, intents.len());
        assert_eq!(ra.accepted, rb.accepted);
    }
}

#[test]
fn test_rejection_classes_cover_random_play() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let intents = random_script(&mut rng, 300);
    let mut store = GameStore::default();

    let mut classes = std::collections::HashSet::new();
    for intent in &intents {
        if let Err(rejection) = kingdoms_cli::script::apply(&mut store, intent) {
            classes.insert(rejection.class());
        }
    }
    assert!(classes.contains(&RejectionClass::Phase));
    assert!(classes.contains(&RejectionClass::Movement) || classes.contains(&RejectionClass::Placement));
}

// ============================================================================
// BINARY
// ============================================================================

#[test]
fn test_board_json_output() {
    let output = kingdoms().args(["board", "--width", "7", "--height", "7", "--json"]).output().unwrap();
    assert!(output.status.success());
    let tiles: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tiles.as_array().map(|t| t.len()), Some(kingdoms_core::initialize_board(7, 7).len()));
}

#[test]
fn test_board_text_output() {
    let output = kingdoms().args(["board"]).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let board = kingdoms_core::initialize_board(15, 11);
    assert!(text.starts_with(&render_board(&board)));
    assert!(text.contains(&format!("hexes: {}", board.len())));
}

#[test]
fn test_capitals_command() {
    let output = kingdoms().args(["capitals", "--player", "2"]).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.lines().any(|l| l == "0,3,-3"));
    assert!(text.lines().all(|l| l.split(',').nth(1).map_or(false, |r| r == "3" || r == "4")));

    let bad = kingdoms().args(["capitals", "--player", "3"]).output().unwrap();
    assert!(!bad.status.success());
}

#[test]
fn test_play_command() {
    let script = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/border_rush.json");
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/config.json");
    let output = kingdoms()
        .args(["play", "--script", script, "--config", config, "--tail", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Steps: 18 accepted, 0 rejected"));
    assert!(text.trim_end().ends_with("Player 1 wins - Border domination achieved!"));
}

#[test]
fn test_play_missing_script_fails() {
    let output = kingdoms().args(["play", "--script", "/nonexistent/script.json"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read script"));
}
