//! Rejected intents
//!
//! Nothing in the engine is fatal. An illegal intent comes back as a
//! [`Rejection`] whose message goes into the game log verbatim.

use thiserror::Error;

use crate::board::{Hex, Player};
use crate::phases::{ActionKind, Phase};

/// Why an intent was refused
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    // Phase violations
    #[error("Cannot {} during {phase}", .action.describe())]
    WrongPhase { action: ActionKind, phase: Phase },
    #[error("Both capitals must be placed before the game can start")]
    SetupIncomplete,

    // Placement violations
    #[error("No hex at {0}")]
    UnknownHex(Hex),
    #[error("No hex at {q},{r}")]
    InvalidCoordinate { q: i32, r: i32 },
    #[error("Cannot place at {hex}: not {player}'s territory")]
    NotYourTerritory { hex: Hex, player: Player },
    #[error("Cannot place at {0}: hex is occupied")]
    Occupied(Hex),
    #[error("Cannot place at {0}: mountains are impassable")]
    Impassable(Hex),
    #[error("Cannot build at {0}: a building already stands there")]
    BuildingPresent(Hex),
    #[error("{unit} does not serve {player}")]
    WrongFaction { unit: String, player: Player },
    #[error("Unknown unit template: {0}")]
    UnknownTemplate(String),

    // Movement violations
    #[error("No unit at {0}")]
    NoUnit(Hex),
    #[error("Cannot move to {to}: destination is occupied")]
    DestinationOccupied { to: Hex },
    #[error("Cannot move to {to}: mountains are impassable")]
    DestinationImpassable { to: Hex },
    #[error("Cannot move to {to}: distance {distance} exceeds movement {movement}")]
    OutOfReach { to: Hex, distance: u32, movement: u32 },

    // Setup violations
    #[error("Invalid capital position at {0}")]
    InvalidCapitalPosition(Hex),
    #[error("{0} is not a capital")]
    NotACapital(String),
    #[error("Capitals can only be founded during setup")]
    CapitalOutsideSetup,

    // Combat violations
    #[error("{attacker} cannot attack its own side")]
    FriendlyTarget { attacker: String },
    #[error("Target at {target} is out of range ({distance} > {range})")]
    OutOfRange { target: Hex, distance: u32, range: u32 },

    #[error("The game is over")]
    GameOver,
}

/// Taxonomy of rejections, for callers that only care about the kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionClass {
    Phase,
    Placement,
    Movement,
    Setup,
    Combat,
    Finished,
}

impl Rejection {
    pub fn class(&self) -> RejectionClass {
        match self {
            Rejection::WrongPhase { .. } | Rejection::SetupIncomplete => RejectionClass::Phase,
            Rejection::UnknownHex(_)
            | Rejection::InvalidCoordinate { .. }
            | Rejection::NotYourTerritory { .. }
            | Rejection::Occupied(_)
            | Rejection::Impassable(_)
            | Rejection::BuildingPresent(_)
            | Rejection::WrongFaction { .. }
            | Rejection::UnknownTemplate(_) => RejectionClass::Placement,
            Rejection::NoUnit(_)
            | Rejection::DestinationOccupied { .. }
            | Rejection::DestinationImpassable { .. }
            | Rejection::OutOfReach { .. } => RejectionClass::Movement,
            Rejection::InvalidCapitalPosition(_)
            | Rejection::NotACapital(_)
            | Rejection::CapitalOutsideSetup => RejectionClass::Setup,
            Rejection::FriendlyTarget { .. } | Rejection::OutOfRange { .. } => RejectionClass::Combat,
            Rejection::GameOver => RejectionClass::Finished,
        }
    }
}
