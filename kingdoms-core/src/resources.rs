//! Resource pools and capital income
//!
//! Income comes only from the capital: each round another of its six
//! neighbors is unlocked, clockwise from the top, until all six produce.
//! Every unlocked neighbor yields one unit of the nation's primary resource
//! per turn whether or not anything stands on it.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::units::Nation;

/// Most neighbors a capital can unlock
pub const MAX_UNLOCKED_HEXES: u32 = 6;

/// Income per unlocked hex
const YIELD_PER_HEX: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Faith,
    Chaos,
    Gold,
    Magic,
    Blood,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Faith,
        ResourceKind::Chaos,
        ResourceKind::Gold,
        ResourceKind::Magic,
        ResourceKind::Blood,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Faith => "Faith",
            ResourceKind::Chaos => "Chaos",
            ResourceKind::Gold => "Gold",
            ResourceKind::Magic => "Magic",
            ResourceKind::Blood => "Blood",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Amounts of all five resources. Every field is always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub faith: u32,
    pub chaos: u32,
    pub gold: u32,
    pub magic: u32,
    pub blood: u32,
}

impl ResourcePool {
    pub fn total(&self) -> u32 {
        ResourceKind::ALL.iter().map(|&k| self[k]).sum()
    }

    /// Copy of this pool with `amount` more of `kind`
    pub fn with_added(mut self, kind: ResourceKind, amount: u32) -> Self {
        self[kind] += amount;
        self
    }
}

impl Index<ResourceKind> for ResourcePool {
    type Output = u32;

    fn index(&self, kind: ResourceKind) -> &u32 {
        match kind {
            ResourceKind::Faith => &self.faith,
            ResourceKind::Chaos => &self.chaos,
            ResourceKind::Gold => &self.gold,
            ResourceKind::Magic => &self.magic,
            ResourceKind::Blood => &self.blood,
        }
    }
}

impl IndexMut<ResourceKind> for ResourcePool {
    fn index_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Faith => &mut self.faith,
            ResourceKind::Chaos => &mut self.chaos,
            ResourceKind::Gold => &mut self.gold,
            ResourceKind::Magic => &mut self.magic,
            ResourceKind::Blood => &mut self.blood,
        }
    }
}

/// Result of one resource phase for one player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Income {
    pub resource: ResourceKind,
    pub amount: u32,
    /// Capital neighbors producing this round, in unlock order
    pub unlocked: Vec<Hex>,
    pub pool: ResourcePool,
    pub log: String,
}

/// How many capital neighbors produce in `round`
pub fn unlocked_count(round: u32) -> u32 {
    round.min(MAX_UNLOCKED_HEXES)
}

/// Capital neighbors unlocked in `round`, clockwise from the top
pub fn unlocked_hexes(capital: Hex, round: u32) -> Vec<Hex> {
    capital
        .neighbors()
        .into_iter()
        .take(unlocked_count(round) as usize)
        .collect()
}

/// Income for a nation in `round`. `None` when there is no capital yet.
pub fn capital_income(
    pool: &ResourcePool,
    nation: Nation,
    capital: Option<Hex>,
    round: u32,
) -> Option<Income> {
    let capital = capital?;
    let resource = nation.primary_resource();
    let unlocked = unlocked_hexes(capital, round);
    let amount = unlocked.len() as u32 * YIELD_PER_HEX;

    Some(Income {
        resource,
        amount,
        pool: pool.with_added(resource, amount),
        log: format!(
            "Round {}: {} generated {} {} from {} unlocked hexes around capital",
            round,
            nation,
            amount,
            resource,
            unlocked.len()
        ),
        unlocked,
    })
}
