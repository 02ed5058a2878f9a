//! Kingdoms CLI - command implementations behind the `kingdoms` binary
//!
//! - board / capitals: inspect generated boards
//! - play: replay an intent script through the game store

pub mod board_cmd;
pub mod play_cmd;
pub mod script;

use std::path::Path;

use anyhow::Result;

use kingdoms_core::GameConfig;

/// Config from a file when one is given, the standard match otherwise
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    }
}
