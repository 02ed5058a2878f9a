//! Intent scripts
//!
//! A script is a JSON array of intents, replayed in order through a
//! [`GameStore`]. Coordinates are `[q, r]` pairs.
//!
//! ```json
//! [
//!   {"intent": "place_capital", "at": [0, -3]},
//!   {"intent": "place_capital", "at": [0, 3]},
//!   {"intent": "advance_to", "phase": "DEVELOPMENT_1"},
//!   {"intent": "place_unit", "at": [0, -2], "template": "altaria-infantry"}
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use kingdoms_core::{BuildingKind, GameStore, Hex, Phase, Rejection};

/// Axial `[q, r]` pair as written in scripts
pub type Coord = [i32; 2];

/// Scripts are untrusted: a pair whose cube `s` overflows names no hex and
/// is rejected through the store
fn hex(store: &mut GameStore, coord: Coord) -> Result<Hex, Rejection> {
    let [q, r] = coord;
    Hex::checked_new(q, r).ok_or_else(|| store.reject(Rejection::InvalidCoordinate { q, r }))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    PlaceCapital { at: Coord },
    PlaceUnit { at: Coord, template: String },
    PlaceBuilding { at: Coord, name: String, kind: BuildingKind },
    MoveUnit { from: Coord, to: Coord },
    Attack { from: Coord, to: Coord },
    AdvancePhase,
    /// Advance at least once, stopping on `phase` or after one full turn
    AdvanceTo { phase: Phase },
}

/// What happened to one script line
#[derive(Clone, Debug, Serialize)]
pub struct Step {
    pub index: usize,
    pub intent: Intent,
    pub rejection: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Replay {
    pub steps: Vec<Step>,
    pub accepted: usize,
    pub rejected: usize,
}

// ============================================================================
// LOADING
// ============================================================================

pub fn parse_script(text: &str) -> Result<Vec<Intent>> {
    serde_json::from_str(text).context("Script must be a JSON array of intents")
}

pub fn load_script(path: &Path) -> Result<Vec<Intent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("Failed to parse script {}", path.display()))
}

// ============================================================================
// REPLAY
// ============================================================================

/// Send one intent to the store
pub fn apply(store: &mut GameStore, intent: &Intent) -> Result<(), Rejection> {
    match intent {
        Intent::PlaceCapital { at } => {
            let at = hex(store, *at)?;
            store.place_capital(at).map(drop)
        }
        Intent::PlaceUnit { at, template } => {
            let at = hex(store, *at)?;
            store.place_unit(at, template).map(drop)
        }
        Intent::PlaceBuilding { at, name, kind } => {
            let at = hex(store, *at)?;
            store.place_building(at, name, *kind).map(drop)
        }
        Intent::MoveUnit { from, to } => {
            let (from, to) = (hex(store, *from)?, hex(store, *to)?);
            store.move_unit(from, to).map(drop)
        }
        Intent::Attack { from, to } => {
            let (from, to) = (hex(store, *from)?, hex(store, *to)?);
            store.attack(from, to).map(drop)
        }
        Intent::AdvancePhase => store.advance_phase().map(drop),
        Intent::AdvanceTo { phase } => {
            for _ in 0..Phase::TURN.len() {
                if store.advance_phase()?.current_phase() == *phase {
                    break;
                }
            }
            Ok(())
        }
    }
}

/// Replay every intent. Rejected lines are recorded and the replay goes on.
pub fn replay(store: &mut GameStore, intents: &[Intent]) -> Replay {
    let mut result = Replay::default();

    for (index, intent) in intents.iter().enumerate() {
        let rejection = match apply(store, intent) {
            Ok(()) => {
                result.accepted += 1;
                None
            }
            Err(rejection) => {
                tracing::warn!("Step {} rejected: {}", index, rejection);
                result.rejected += 1;
                Some(rejection.to_string())
            }
        };
        result.steps.push(Step {
            index,
            intent: intent.clone(),
            rejection,
        });
    }

    result
}
