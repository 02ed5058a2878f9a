//! Game configuration
//!
//! Board dimensions and the two nations at the table. Loaded from JSON by the
//! CLI; every field is optional and falls back to the standard match.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::board::{initialize_board, Player, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::setup::valid_capital_positions;
use crate::units::Nation;

/// Smallest width or height accepted. Capital sites need more: a height
/// below 8 leaves each territory too shallow for a full ring.
pub const MIN_DIMENSION: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub player1_nation: Nation,
    pub player2_nation: Nation,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            player1_nation: Nation::Altaria,
            player2_nation: Nation::Cartasia,
        }
    }
}

impl GameConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot start a game from
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            bail!(
                "Board {}x{} is too small (minimum {}x{})",
                self.width,
                self.height,
                MIN_DIMENSION,
                MIN_DIMENSION
            );
        }
        let board = initialize_board(self.width, self.height);
        for player in [Player::Player1, Player::Player2] {
            if valid_capital_positions(&board, player).is_empty() {
                bail!(
                    "Board {}x{} has no capital site for {}",
                    self.width,
                    self.height,
                    player
                );
            }
        }
        if self.player1_nation == self.player2_nation {
            bail!("Both players cannot play {}", self.player1_nation);
        }
        for nation in [self.player1_nation, self.player2_nation] {
            if nation.capital_template().is_none() {
                bail!("{} has no capital and cannot be played", nation);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (15, 11));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"width": 9}"#).unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.player2_nation, Nation::Cartasia);
    }

    #[test]
    fn test_validation_failures() {
        let small = GameConfig { height: 3, ..Default::default() };
        assert!(small.validate().is_err());

        let mirror = GameConfig { player2_nation: Nation::Altaria, ..Default::default() };
        assert!(mirror.validate().unwrap_err().to_string().contains("Altaria"));

        let capitalless = GameConfig { player1_nation: Nation::Void, ..Default::default() };
        assert!(capitalless.validate().is_err());
    }

    #[test]
    fn test_boards_without_capital_sites_rejected() {
        for height in [5, 6, 7] {
            let shallow = GameConfig { height, ..Default::default() };
            let err = shallow.validate().unwrap_err().to_string();
            assert!(err.contains("no capital site for player1"), "{}", err);
        }

        let config = GameConfig { width: MIN_DIMENSION, height: 8, ..Default::default() };
        assert!(config.validate().is_ok());
        let board = initialize_board(config.width, config.height);
        assert!(!valid_capital_positions(&board, Player::Player2).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/kingdoms.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
