//! Kingdoms Core - rule engine
//!
//! This crate provides the rules of a two-player hex territory game:
//! - Board geometry (hex grid with cube coordinates) and generation
//! - Capital placement and capital-driven resource income
//! - Placement, movement and combat rules
//! - The turn phase machine and victory conditions
//! - An authoritative store that owns the current snapshot

pub mod board;
pub mod units;
pub mod resources;
pub mod phases;
pub mod error;
pub mod setup;
pub mod rules;
pub mod combat;
pub mod victory;
pub mod game;
pub mod config;
pub mod store;

// Re-exports for convenient access
pub use board::{initialize_board, Board, Hex, HexTile, Owner, Player, Terrain, DIRECTIONS};
pub use units::{get_template, Building, BuildingKind, Faction, Nation, Unit, UnitType, UNIT_TEMPLATES};
pub use resources::{capital_income, ResourceKind, ResourcePool};
pub use phases::{can_perform_action, ActionKind, Phase};
pub use error::{Rejection, RejectionClass};
pub use setup::{is_valid_capital_position, valid_capital_positions};
pub use rules::{is_valid_move, is_valid_placement, valid_destinations, valid_placements};
pub use combat::{resolve_combat, CombatOutcome, CombatReport};
pub use victory::{Victory, VictoryReason};
pub use game::{GameState, PlayerState};
pub use config::GameConfig;
pub use store::GameStore;
