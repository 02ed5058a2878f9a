//! Game state and turn flow
//!
//! A [`GameState`] is an immutable snapshot. Every intent is checked against
//! the current snapshot and, when accepted, produces a new one; a rejected
//! intent leaves the snapshot exactly as it was.

use serde::Serialize;
use tracing::{debug, info};

use crate::board::{initialize_board, Board, Hex, HexTile, Player};
use crate::combat::{resolve_combat, CombatReport};
use crate::config::GameConfig;
use crate::error::Rejection;
use crate::phases::{can_perform_action, ActionKind, Phase};
use crate::resources::{capital_income, ResourcePool};
use crate::rules::{is_valid_move, is_valid_placement};
use crate::setup::is_valid_capital_position;
use crate::units::{Building, Nation, Unit};
use crate::victory::{self, Victory, VictoryReason};

// ============================================================================
// PLAYER STATE
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub id: Player,
    pub nation: Nation,
    pub resources: ResourcePool,
    /// Units deployed this turn
    pub units_placed: u32,
    /// Buildings raised this turn
    pub buildings_placed: u32,
    /// Where the capital was founded. The unit itself lives on the board.
    pub capital_hex: Option<Hex>,
    pub has_drawn_card: bool,
    /// Capital neighbors producing income this round
    pub resource_hexes: Vec<Hex>,
}

impl PlayerState {
    pub fn new(id: Player, nation: Nation) -> Self {
        Self {
            id,
            nation,
            resources: ResourcePool::default(),
            units_placed: 0,
            buildings_placed: 0,
            capital_hex: None,
            has_drawn_card: false,
            resource_hexes: Vec::new(),
        }
    }

    fn reset_turn_counters(&mut self) {
        self.units_placed = 0;
        self.buildings_placed = 0;
        self.has_drawn_card = false;
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    players: [PlayerState; 2],
    current_player: Player,
    current_phase: Phase,
    /// Player switches since setup
    turn: u32,
    /// Completed by player2, so it advances when player1 takes over
    round: u32,
    board: Board,
    log: Vec<String>,
    outcome: Option<Victory>,
    /// Logical clock for placement ids
    next_serial: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameState {
    /// SETUP snapshot on a freshly generated board
    pub fn new(config: &GameConfig) -> Self {
        Self::with_nations(config.player1_nation, config.player2_nation)
            .with_board(initialize_board(config.width, config.height))
    }

    /// SETUP snapshot on an empty board
    pub fn with_nations(player1: Nation, player2: Nation) -> Self {
        Self {
            players: [
                PlayerState::new(Player::Player1, player1),
                PlayerState::new(Player::Player2, player2),
            ],
            current_player: Player::Player1,
            current_phase: Phase::Setup,
            turn: 0,
            round: 0,
            board: Board::default(),
            log: Vec::new(),
            outcome: None,
            next_serial: 1,
        }
    }

    /// Swap in a board. Capital references are coordinates, so they now
    /// resolve against the new tiles.
    pub fn with_board(mut self, board: Board) -> Self {
        debug!(hexes = board.len(), "board installed");
        self.push_log(format!("Board initialized with {} hexes", board.len()));
        self.board = board;
        self
    }

    /// Copy of this snapshot with one more log line
    pub fn with_log(&self, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push_log(message.into());
        next
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    /// State of the player whose turn it is
    pub fn active_player(&self) -> &PlayerState {
        self.player(self.current_player)
    }

    pub fn outcome(&self) -> Option<Victory> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        self.outcome.map(|v| v.winner)
    }

    /// The player's capital as it stands on the board right now
    pub fn capital(&self, player: Player) -> Option<&Unit> {
        let owner = self.player(player);
        let hex = owner.capital_hex?;
        self.board
            .get(hex)?
            .unit
            .as_ref()
            .filter(|u| u.is_capital() && u.belongs_to(owner.nation))
    }

    pub fn can_perform(&self, action: ActionKind) -> bool {
        can_perform_action(self, action)
    }

    // ========================================================================
    // SETUP
    // ========================================================================

    /// Found the current setup player's capital. Player1 founds first; the
    /// second capital starts turn 1.
    pub fn place_capital(&self, hex: Hex, capital: Unit) -> Result<Self, Rejection> {
        self.ensure_ongoing()?;
        if self.current_phase != Phase::Setup {
            return Err(Rejection::CapitalOutsideSetup);
        }

        let player = self.current_player;
        let nation = self.active_player().nation;
        if !capital.is_capital() {
            return Err(Rejection::NotACapital(capital.name));
        }
        if !capital.belongs_to(nation) {
            return Err(Rejection::WrongFaction { unit: capital.name, player });
        }
        if !is_valid_capital_position(&self.board, hex, player) {
            return Err(Rejection::InvalidCapitalPosition(hex));
        }

        let mut next = self.clone();
        let capital = next.stamp(capital);
        debug!(%hex, id = %capital.id, "capital founded");
        next.push_log(format!("{} founded {} at {}", nation, capital.name, hex));
        next.tile_mut(hex)?.unit = Some(capital);
        next.players[player.index()].capital_hex = Some(hex);

        match player {
            Player::Player1 => {
                next.current_player = Player::Player2;
                let waiting = next.player(Player::Player2).nation;
                next.push_log(format!("{} to place their capital", waiting));
            }
            Player::Player2 => next.begin_first_turn(),
        }
        Ok(next)
    }

    fn begin_first_turn(&mut self) {
        self.current_player = Player::Player1;
        self.turn = 1;
        self.round = 1;
        let first = self.active_player().nation;
        info!(first = %first, "setup complete");
        self.push_log(format!("Setup complete. Starting game with {}'s turn", first));
        self.enter_phase(Phase::Resource);
    }

    // ========================================================================
    // DEVELOPMENT
    // ========================================================================

    /// Deploy a unit of the active nation onto its own territory
    pub fn place_unit(&self, hex: Hex, unit: Unit) -> Result<Self, Rejection> {
        self.require(ActionKind::PlaceUnit)?;

        let player = self.current_player;
        let nation = self.active_player().nation;
        if unit.is_capital() {
            return Err(Rejection::CapitalOutsideSetup);
        }
        if !unit.belongs_to(nation) {
            return Err(Rejection::WrongFaction { unit: unit.name, player });
        }
        let tile = self.tile(hex)?;
        if !is_valid_placement(tile, player) {
            return Err(placement_rejection(tile, player));
        }

        let mut next = self.clone();
        let unit = next.stamp(unit);
        debug!(%hex, id = %unit.id, "unit placed");
        next.push_log(format!("{} placed {} at {}", nation, unit.name, hex));
        next.tile_mut(hex)?.unit = Some(unit);
        next.players[player.index()].units_placed += 1;
        Ok(next)
    }

    /// Raise a building on the active player's territory
    pub fn place_building(&self, hex: Hex, building: Building) -> Result<Self, Rejection> {
        self.require(ActionKind::PlaceBuilding)?;

        let player = self.current_player;
        let nation = self.active_player().nation;
        if building.owner != nation {
            return Err(Rejection::WrongFaction { unit: building.name, player });
        }
        let tile = self.tile(hex)?;
        if !tile.is_owned_by(player) {
            return Err(Rejection::NotYourTerritory { hex, player });
        }
        if !tile.terrain.is_passable() {
            return Err(Rejection::Impassable(hex));
        }
        if tile.building.is_some() {
            return Err(Rejection::BuildingPresent(hex));
        }

        let mut next = self.clone();
        let mut building = building;
        building.id = format!("{}_{}", building.id, next.next_serial);
        next.next_serial += 1;
        debug!(%hex, id = %building.id, "building placed");
        next.push_log(format!("{} built {} at {}", nation, building.name, hex));
        next.tile_mut(hex)?.building = Some(building);
        next.players[player.index()].buildings_placed += 1;
        Ok(next)
    }

    // ========================================================================
    // MOVEMENT & COMBAT
    // ========================================================================

    /// Move one of the active nation's units
    pub fn move_unit(&self, from: Hex, to: Hex) -> Result<Self, Rejection> {
        self.require(ActionKind::MoveUnit)?;

        let player = self.current_player;
        let nation = self.active_player().nation;
        let origin = self.tile(from)?;
        let unit = origin.unit.as_ref().ok_or(Rejection::NoUnit(from))?;
        if !unit.belongs_to(nation) {
            return Err(Rejection::WrongFaction { unit: unit.name.clone(), player });
        }
        let target = self.tile(to)?;
        if !is_valid_move(origin, target) {
            return Err(move_rejection(origin, target, unit));
        }

        let mut next = self.clone();
        let unit = next.tile_mut(from)?.unit.take().ok_or(Rejection::NoUnit(from))?;
        debug!(%from, %to, id = %unit.id, "unit moved");
        next.push_log(format!("{} moved {} from {} to {}", nation, unit.name, from, to));
        next.tile_mut(to)?.unit = Some(unit);
        Ok(next)
    }

    /// Attack an enemy unit within range. The exchange is written back to
    /// the board: survivors keep their new hit points, the defeated are
    /// removed.
    pub fn attack(&self, from: Hex, to: Hex) -> Result<(Self, CombatReport), Rejection> {
        self.require(ActionKind::Attack)?;

        let player = self.current_player;
        let nation = self.active_player().nation;
        let attacker = self.tile(from)?.unit.as_ref().ok_or(Rejection::NoUnit(from))?;
        if !attacker.belongs_to(nation) {
            return Err(Rejection::WrongFaction { unit: attacker.name.clone(), player });
        }
        let defender = self.tile(to)?.unit.as_ref().ok_or(Rejection::NoUnit(to))?;
        if defender.faction == attacker.faction {
            return Err(Rejection::FriendlyTarget { attacker: attacker.name.clone() });
        }
        let distance = from.distance_to(to);
        if distance > attacker.range {
            return Err(Rejection::OutOfRange { target: to, distance, range: attacker.range });
        }

        let report = resolve_combat(attacker, defender);
        let mut next = self.clone();
        next.apply_damage(from, report.attacker_hp)?;
        next.apply_damage(to, report.defender_hp)?;
        next.log.extend(report.log.iter().cloned());
        debug!(%from, %to, outcome = ?report.outcome, "combat resolved");
        Ok((next, report))
    }

    fn apply_damage(&mut self, hex: Hex, hit_points: i32) -> Result<(), Rejection> {
        let tile = self.tile_mut(hex)?;
        if hit_points > 0 {
            if let Some(unit) = tile.unit.as_mut() {
                unit.hit_points = hit_points;
            }
        } else {
            tile.unit = None;
        }
        Ok(())
    }

    // ========================================================================
    // PHASES
    // ========================================================================

    /// Move to the next phase and run its entry effects
    pub fn advance_phase(&self) -> Result<Self, Rejection> {
        self.ensure_ongoing()?;
        if self.current_phase == Phase::Setup {
            return Err(Rejection::SetupIncomplete);
        }

        let mut next = self.clone();
        if self.current_phase == Phase::End {
            next.start_next_turn();
        }
        next.enter_phase(self.current_phase.next());
        Ok(next)
    }

    fn start_next_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.turn += 1;
        if self.current_player == Player::Player1 {
            self.round += 1;
        }
        debug!(turn = self.turn, round = self.round, player = %self.current_player, "turn started");
        let nation = self.active_player().nation;
        self.push_log(format!("Turn {}: {}'s turn", self.turn, nation));
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.current_phase = phase;
        debug!(phase = ?phase, player = %self.current_player, "phase entered");
        self.push_log(format!("{} entered {}", self.active_player().nation, phase));

        match phase {
            Phase::Resource => self.collect_income(),
            Phase::Draw => self.draw_card(),
            Phase::End => self.end_turn(),
            _ => {}
        }
    }

    fn collect_income(&mut self) {
        let active = self.active_player();
        let Some(income) =
            capital_income(&active.resources, active.nation, active.capital_hex, self.round)
        else {
            return;
        };

        let active = &mut self.players[self.current_player.index()];
        active.resources = income.pool;
        active.resource_hexes = income.unlocked;
        self.push_log(income.log);
    }

    // Cards are not modelled beyond the flag
    fn draw_card(&mut self) {
        let active = &mut self.players[self.current_player.index()];
        active.has_drawn_card = true;
        let nation = active.nation;
        self.push_log(format!("{} drew a card", nation));
    }

    fn end_turn(&mut self) {
        self.players[self.current_player.index()].reset_turn_counters();

        if let Some(victory) = victory::evaluate(self) {
            info!(winner = %victory.winner, reason = ?victory.reason, "game over");
            let announcement = self.announce(victory);
            self.push_log(announcement);
            self.outcome = Some(victory);
        }
    }

    fn announce(&self, victory: Victory) -> String {
        let winner = match victory.winner {
            Player::Player1 => "Player 1",
            Player::Player2 => "Player 2",
        };
        match victory.reason {
            VictoryReason::CapitalDestroyed => format!(
                "{} wins - {} capital destroyed!",
                winner,
                self.player(victory.winner.opponent()).nation
            ),
            VictoryReason::BorderDomination => {
                format!("{} wins - Border domination achieved!", winner)
            }
        }
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn ensure_ongoing(&self) -> Result<(), Rejection> {
        if self.is_game_over() {
            return Err(Rejection::GameOver);
        }
        Ok(())
    }

    fn require(&self, action: ActionKind) -> Result<(), Rejection> {
        self.ensure_ongoing()?;
        if !can_perform_action(self, action) {
            return Err(Rejection::WrongPhase { action, phase: self.current_phase });
        }
        Ok(())
    }

    fn tile(&self, hex: Hex) -> Result<&HexTile, Rejection> {
        self.board.get(hex).ok_or(Rejection::UnknownHex(hex))
    }

    fn tile_mut(&mut self, hex: Hex) -> Result<&mut HexTile, Rejection> {
        self.board.get_mut(hex).ok_or(Rejection::UnknownHex(hex))
    }

    /// Give a unit its placement id, `<template id>_<serial>`
    fn stamp(&mut self, mut unit: Unit) -> Unit {
        unit.id = format!("{}_{}", unit.id, self.next_serial);
        self.next_serial += 1;
        unit
    }

    fn push_log(&mut self, message: String) {
        self.log.push(message);
    }
}

/// First placement rule `tile` breaks
fn placement_rejection(tile: &HexTile, player: Player) -> Rejection {
    if !tile.is_owned_by(player) {
        Rejection::NotYourTerritory { hex: tile.hex, player }
    } else if tile.unit.is_some() {
        Rejection::Occupied(tile.hex)
    } else {
        Rejection::Impassable(tile.hex)
    }
}

/// First movement rule the step from `origin` to `target` breaks
fn move_rejection(origin: &HexTile, target: &HexTile, unit: &Unit) -> Rejection {
    let to = target.hex;
    if target.unit.is_some() {
        Rejection::DestinationOccupied { to }
    } else if !target.terrain.is_passable() {
        Rejection::DestinationImpassable { to }
    } else {
        Rejection::OutOfReach {
            to,
            distance: origin.hex.distance_to(to),
            movement: unit.movement,
        }
    }
}
