//! Turn phases and the action capability table

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Capital placement, entered once and left once
    Setup,
    Resource,
    Draw,
    #[serde(rename = "DEVELOPMENT_1")]
    Development1,
    Movement,
    Combat,
    #[serde(rename = "DEVELOPMENT_2")]
    Development2,
    End,
}

/// Classes of action gated by phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    PlaceUnit,
    PlaceBuilding,
    MoveUnit,
    Attack,
    PlayCard,
}

impl ActionKind {
    /// Verb phrase for rejection messages
    pub fn describe(self) -> &'static str {
        match self {
            ActionKind::PlaceUnit => "place units",
            ActionKind::PlaceBuilding => "place buildings",
            ActionKind::MoveUnit => "move units",
            ActionKind::Attack => "attack",
            ActionKind::PlayCard => "play cards",
        }
    }
}

/// Static metadata for a phase
#[derive(Clone, Copy, Debug)]
pub struct PhaseInfo {
    pub display_name: &'static str,
    pub description: &'static str,
    pub can_place_units: bool,
    pub can_place_buildings: bool,
    pub can_move_units: bool,
    pub can_attack: bool,
    pub can_play_cards: bool,
}

impl PhaseInfo {
    const fn passive(display_name: &'static str, description: &'static str) -> Self {
        Self {
            display_name,
            description,
            can_place_units: false,
            can_place_buildings: false,
            can_move_units: false,
            can_attack: false,
            can_play_cards: false,
        }
    }

    const fn development(display_name: &'static str, description: &'static str) -> Self {
        Self {
            can_place_units: true,
            can_place_buildings: true,
            can_play_cards: true,
            ..Self::passive(display_name, description)
        }
    }

    pub fn permits(&self, action: ActionKind) -> bool {
        match action {
            ActionKind::PlaceUnit => self.can_place_units,
            ActionKind::PlaceBuilding => self.can_place_buildings,
            ActionKind::MoveUnit => self.can_move_units,
            ActionKind::Attack => self.can_attack,
            ActionKind::PlayCard => self.can_play_cards,
        }
    }
}

const SETUP: PhaseInfo = PhaseInfo::passive("Setup Phase", "Place your capital to start the game.");
const RESOURCE: PhaseInfo =
    PhaseInfo::passive("Resource Phase", "Collect resources from your capital.");
const DRAW: PhaseInfo = PhaseInfo::passive("Draw Phase", "Draw a card from your deck.");
const DEVELOPMENT_1: PhaseInfo = PhaseInfo::development(
    "Development Phase",
    "Deploy units and buildings to your kingdom.",
);
const MOVEMENT: PhaseInfo = PhaseInfo {
    can_move_units: true,
    ..PhaseInfo::passive("Movement Phase", "Move your units across the battlefield.")
};
const COMBAT: PhaseInfo = PhaseInfo {
    can_attack: true,
    ..PhaseInfo::passive("Combat Phase", "Declare attacks against enemy units.")
};
const DEVELOPMENT_2: PhaseInfo = PhaseInfo::development(
    "Second Development Phase",
    "Deploy additional units and buildings.",
);
const END: PhaseInfo = PhaseInfo::passive(
    "End Phase",
    "Resolve end-of-turn effects and check for victory.",
);

impl Phase {
    /// Phases of a regular turn, in order
    pub const TURN: [Phase; 7] = [
        Phase::Resource,
        Phase::Draw,
        Phase::Development1,
        Phase::Movement,
        Phase::Combat,
        Phase::Development2,
        Phase::End,
    ];

    pub fn info(self) -> &'static PhaseInfo {
        match self {
            Phase::Setup => &SETUP,
            Phase::Resource => &RESOURCE,
            Phase::Draw => &DRAW,
            Phase::Development1 => &DEVELOPMENT_1,
            Phase::Movement => &MOVEMENT,
            Phase::Combat => &COMBAT,
            Phase::Development2 => &DEVELOPMENT_2,
            Phase::End => &END,
        }
    }

    /// Next phase in the cycle. END wraps to RESOURCE; SETUP is never re-entered.
    pub fn next(self) -> Phase {
        match self {
            Phase::Setup => Phase::Resource,
            Phase::Resource => Phase::Draw,
            Phase::Draw => Phase::Development1,
            Phase::Development1 => Phase::Movement,
            Phase::Movement => Phase::Combat,
            Phase::Combat => Phase::Development2,
            Phase::Development2 => Phase::End,
            Phase::End => Phase::Resource,
        }
    }

    pub fn permits(self, action: ActionKind) -> bool {
        self.info().permits(action)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().display_name)
    }
}

/// Whether `action` is allowed right now. The only legality gate for phases.
pub fn can_perform_action(state: &GameState, action: ActionKind) -> bool {
    !state.is_game_over() && state.current_phase().permits(action)
}
