//! The single authoritative game snapshot
//!
//! Consumers never mutate a [`GameState`] themselves. They send intents to
//! the store, which swaps in the next snapshot and bumps its revision so
//! anything derived from the old snapshot knows to rebuild.

use tracing::debug;

use crate::board::Hex;
use crate::combat::CombatReport;
use crate::config::GameConfig;
use crate::error::Rejection;
use crate::game::GameState;
use crate::units::{get_template, Building, BuildingKind};

#[derive(Clone, Debug)]
pub struct GameStore {
    state: GameState,
    revision: u64,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameStore {
    pub fn new(config: &GameConfig) -> Self {
        Self::from_state(GameState::new(config))
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Bumped on every snapshot replacement, rejections included
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The last `n` log lines
    pub fn log_tail(&self, n: usize) -> &[String] {
        let log = self.state.log();
        &log[log.len().saturating_sub(n)..]
    }

    // ========================================================================
    // INTENTS
    // ========================================================================

    /// Found the current setup player's capital with their nation's template
    pub fn place_capital(&mut self, hex: Hex) -> Result<&GameState, Rejection> {
        let nation = self.state.active_player().nation;
        let result = nation
            .capital_template()
            .ok_or_else(|| Rejection::UnknownTemplate(format!("{}-capital", nation.name().to_lowercase())))
            .and_then(|template| self.state.place_capital(hex, template.instantiate()));
        self.commit(result)
    }

    /// Deploy a unit from a template id, e.g. `altaria-archer`
    pub fn place_unit(&mut self, hex: Hex, template_id: &str) -> Result<&GameState, Rejection> {
        let result = get_template(template_id)
            .ok_or_else(|| Rejection::UnknownTemplate(template_id.to_string()))
            .and_then(|template| self.state.place_unit(hex, template.instantiate()));
        self.commit(result)
    }

    pub fn place_building(
        &mut self,
        hex: Hex,
        name: &str,
        kind: BuildingKind,
    ) -> Result<&GameState, Rejection> {
        let building = Building::new(name, kind, self.state.active_player().nation);
        let result = self.state.place_building(hex, building);
        self.commit(result)
    }

    pub fn move_unit(&mut self, from: Hex, to: Hex) -> Result<&GameState, Rejection> {
        let result = self.state.move_unit(from, to);
        self.commit(result)
    }

    pub fn attack(&mut self, from: Hex, to: Hex) -> Result<CombatReport, Rejection> {
        match self.state.attack(from, to) {
            Ok((next, report)) => {
                self.replace(next);
                Ok(report)
            }
            Err(rejection) => Err(self.reject(rejection)),
        }
    }

    pub fn advance_phase(&mut self) -> Result<&GameState, Rejection> {
        let result = self.state.advance_phase();
        self.commit(result)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn commit(&mut self, result: Result<GameState, Rejection>) -> Result<&GameState, Rejection> {
        match result {
            Ok(next) => {
                self.replace(next);
                Ok(&self.state)
            }
            Err(rejection) => Err(self.reject(rejection)),
        }
    }

    fn replace(&mut self, next: GameState) {
        self.state = next;
        self.revision += 1;
    }

    /// Record the reason in the log. A finished game is frozen, so its
    /// snapshot stays as it is.
    /// Record a rejection decided before reaching the engine, such as an
    /// unreadable coordinate. Logged like any other rejection.
    pub fn reject(&mut self, rejection: Rejection) -> Rejection {
        debug!(reason = %rejection, class = ?rejection.class(), "intent rejected");
        if !self.state.is_game_over() {
            let logged = self.state.with_log(rejection.to_string());
            self.replace(logged);
        }
        rejection
    }
}
