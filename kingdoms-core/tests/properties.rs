//! Property-based tests for board generation, income, combat and phase gating.

use proptest::prelude::*;

use kingdoms_core::{
    can_perform_action, capital_income, initialize_board, is_valid_capital_position,
    resolve_combat, valid_capital_positions, ActionKind, CombatOutcome, Faction, GameConfig,
    GameState, Hex, Nation, Owner, Player, ResourcePool, Unit, UnitType,
};

fn unit(attack_power: i32, hit_points: i32, max_hit_points: i32) -> Unit {
    Unit {
        id: "dummy".to_string(),
        name: "Dummy".to_string(),
        unit_type: UnitType::Infantry,
        faction: Faction::Nation(Nation::Altaria),
        attack_power,
        hit_points,
        max_hit_points,
        movement: 1,
        range: 1,
        abilities: vec![],
    }
}

const ACTIONS: [ActionKind; 5] = [
    ActionKind::PlaceUnit,
    ActionKind::PlaceBuilding,
    ActionKind::MoveUnit,
    ActionKind::Attack,
    ActionKind::PlayCard,
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every generated hex satisfies the cube invariant and has a unique id.
    #[test]
    fn prop_board_cube_invariant(width in 0u32..30, height in 0u32..30) {
        let board = initialize_board(width, height);
        let mut seen = std::collections::HashSet::new();
        for tile in board.tiles() {
            prop_assert_eq!(tile.hex.q() + tile.hex.r() + tile.hex.s(), 0);
            prop_assert!(seen.insert(tile.hex));
            prop_assert!(board.contains(tile.hex));
        }
    }

    /// Territory follows the row banding on every board size.
    #[test]
    fn prop_board_banding(width in 1u32..30, height in 1u32..30) {
        let board = initialize_board(width, height);
        for tile in board.tiles() {
            let expected = match tile.hex.r() {
                r if r < -1 => Owner::Player1,
                r if r > 1 => Owner::Player2,
                _ => Owner::Neutral,
            };
            prop_assert_eq!(tile.owner, expected);
        }
    }

    /// Generation is a pure function of its dimensions.
    #[test]
    fn prop_board_deterministic(width in 0u32..25, height in 0u32..25) {
        prop_assert_eq!(initialize_board(width, height), initialize_board(width, height));
    }

    /// Capital sites are always surrounded by six friendly, open hexes, and
    /// every accepted config has at least one for each player.
    #[test]
    fn prop_capital_sites_have_full_ring(width in 5u32..21, height in 5u32..21) {
        let board = initialize_board(width, height);
        let config = GameConfig { width, height, ..Default::default() };
        prop_assert_eq!(config.validate().is_ok(), height >= 8);
        for player in [Player::Player1, Player::Player2] {
            let sites = valid_capital_positions(&board, player);
            if config.validate().is_ok() {
                prop_assert!(!sites.is_empty());
            }
            for hex in sites {
                prop_assert!(is_valid_capital_position(&board, hex, player));
                let ring: Vec<_> = board.neighbors(hex).collect();
                prop_assert_eq!(ring.len(), 6);
                prop_assert!(ring.iter().all(|t| t.is_owned_by(player) && t.terrain.is_passable()));
            }
        }
    }

    /// Income is min(round, 6) of the primary resource and nothing else.
    #[test]
    fn prop_income_matches_round(round in 1u32..200, q in -3i32..=3) {
        let pool = ResourcePool::default();
        let income = capital_income(&pool, Nation::Cartasia, Some(Hex::new(q, 3)), round).unwrap();
        prop_assert_eq!(income.amount, round.min(6));
        prop_assert_eq!(income.pool.blood, round.min(6));
        prop_assert_eq!(income.pool.total(), round.min(6));
        prop_assert_eq!(income.unlocked.len() as u32, round.min(6));
    }

    /// Damage is symmetric and the verdict flips with the roles.
    #[test]
    fn prop_combat_role_swap(
        a_atk in 0i32..10, a_hp in 1i32..20, a_extra in 0i32..10,
        b_atk in 0i32..10, b_hp in 1i32..20, b_extra in 0i32..10,
    ) {
        let a = unit(a_atk, a_hp, a_hp + a_extra);
        let b = unit(b_atk, b_hp, b_hp + b_extra);
        let forward = resolve_combat(&a, &b);
        let reverse = resolve_combat(&b, &a);

        prop_assert_eq!(forward.attacker_hp, reverse.defender_hp);
        prop_assert_eq!(forward.defender_hp, reverse.attacker_hp);
        let flipped = match reverse.outcome {
            CombatOutcome::AttackerWins => CombatOutcome::DefenderWins,
            CombatOutcome::DefenderWins => CombatOutcome::AttackerWins,
            CombatOutcome::Draw => CombatOutcome::Draw,
        };
        prop_assert_eq!(forward.outcome, flipped);
    }

    /// Asking the phase table is pure: the same answer every time, no effects.
    #[test]
    fn prop_can_perform_action_idempotent(steps in 0usize..30, action in 0usize..5) {
        let mut state = GameState::default()
            .place_capital(Hex::new(0, -3), Nation::Altaria.capital_template().unwrap().instantiate())
            .unwrap()
            .place_capital(Hex::new(0, 3), Nation::Cartasia.capital_template().unwrap().instantiate())
            .unwrap();
        for _ in 0..steps {
            state = state.advance_phase().unwrap();
        }

        let before = state.clone();
        let action = ACTIONS[action];
        let first = can_perform_action(&state, action);
        for _ in 0..3 {
            prop_assert_eq!(can_perform_action(&state, action), first);
        }
        prop_assert_eq!(first, state.current_phase().permits(action));
        prop_assert_eq!(state, before);
    }
}
