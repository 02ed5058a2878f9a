//! Hex board geometry with cube coordinates, terrain and territory

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::units::{Building, Unit};

/// Cube hex coordinates. `q + r + s == 0` holds for every value.
///
/// The coordinate is also the hex id: it is unique on a board and displays
/// as `q,r,s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Hex {
    q: i32,
    r: i32,
    s: i32,
}

impl Hex {
    /// Build from axial coordinates, deriving `s`
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Build from untrusted axial coordinates, `None` when `s` does not fit
    /// in an `i32`
    pub fn checked_new(q: i32, r: i32) -> Option<Self> {
        let s = q.checked_neg()?.checked_sub(r)?;
        Some(Self { q, r, s })
    }

    /// Build from all three cube coordinates, `None` if they do not sum to zero
    pub fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        let sum = q.checked_add(r)?.checked_add(s)?;
        (sum == 0).then_some(Self { q, r, s })
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    pub const fn s(&self) -> i32 {
        self.s
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        dq.max(dr).max(ds)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Hex {
        let (dq, dr) = DIRECTIONS[direction % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, clockwise from the top
    pub fn neighbors(&self) -> [Hex; 6] {
        std::array::from_fn(|dir| self.neighbor(dir))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

/// Direction vectors in axial coordinates (dq, dr), clockwise on a
/// flat-topped layout.
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
pub const DIRECTIONS: [(i32, i32); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // NW
];

/// Default board dimensions, large enough for every terrain feature to land
pub const DEFAULT_WIDTH: u32 = 15;
pub const DEFAULT_HEIGHT: u32 = 11;

// ============================================================================
// TILE DATA
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Plain,
    Mountain,
    Forest,
    River,
    Magic,
}

impl Terrain {
    /// Mountains can neither be entered nor built on
    pub fn is_passable(self) -> bool {
        self != Terrain::Mountain
    }
}

/// One of the two seats at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Player1 = 0,
    Player2 = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Player1 => write!(f, "player1"),
            Player::Player2 => write!(f, "player2"),
        }
    }
}

/// Static territory of a hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Player1,
    Player2,
    Neutral,
}

impl From<Player> for Owner {
    fn from(player: Player) -> Self {
        match player {
            Player::Player1 => Owner::Player1,
            Player::Player2 => Owner::Player2,
        }
    }
}

/// A hex on the board together with whatever stands on it
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HexTile {
    pub hex: Hex,
    pub terrain: Terrain,
    pub owner: Owner,
    pub unit: Option<Unit>,
    pub building: Option<Building>,
}

impl HexTile {
    fn new(hex: Hex, owner: Owner) -> Self {
        Self {
            hex,
            terrain: Terrain::Plain,
            owner,
            unit: None,
            building: None,
        }
    }

    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Owner::from(player)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// The authoritative set of tiles plus a coordinate index
#[derive(Clone, Debug, Default)]
pub struct Board {
    tiles: Vec<HexTile>,
    index: FxHashMap<Hex, usize>,
}

impl Board {
    /// Build a board from tiles. Later duplicates of a coordinate are dropped.
    pub fn from_tiles(tiles: impl IntoIterator<Item = HexTile>) -> Self {
        let mut board = Self::default();
        for tile in tiles {
            debug_assert_eq!(tile.hex.q + tile.hex.r + tile.hex.s, 0, "broken cube invariant");
            if board.index.contains_key(&tile.hex) {
                continue;
            }
            board.index.insert(tile.hex, board.tiles.len());
            board.tiles.push(tile);
        }
        board
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    pub fn get(&self, hex: Hex) -> Option<&HexTile> {
        self.index.get(&hex).map(|&i| &self.tiles[i])
    }

    pub(crate) fn get_mut(&mut self, hex: Hex) -> Option<&mut HexTile> {
        self.index.get(&hex).map(|&i| &mut self.tiles[i])
    }

    /// Tiles in generation order
    pub fn tiles(&self) -> &[HexTile] {
        &self.tiles
    }

    /// Neighbors of `hex` that exist on this board
    pub fn neighbors(&self, hex: Hex) -> impl Iterator<Item = &HexTile> + '_ {
        hex.neighbors().into_iter().filter_map(move |n| self.get(n))
    }

    /// The central row (`r == 0`), the border contested for domination
    pub fn central_row(&self) -> impl Iterator<Item = &HexTile> + '_ {
        self.tiles.iter().filter(|t| t.hex.r == 0)
    }

    /// Number of hexes in a territory
    pub fn territory_size(&self, owner: Owner) -> usize {
        self.tiles.iter().filter(|t| t.owner == owner).count()
    }

    /// Iterate placed units with their positions
    pub fn units(&self) -> impl Iterator<Item = (Hex, &Unit)> + '_ {
        self.tiles
            .iter()
            .filter_map(|t| t.unit.as_ref().map(|u| (t.hex, u)))
    }

    fn set_terrain(&mut self, hex: Hex, terrain: Terrain) {
        if let Some(tile) = self.get_mut(hex) {
            tile.terrain = terrain;
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

/// Serialized as the plain tile list
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tiles.serialize(serializer)
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Territory banding: one neutral row either side of the center line
fn territory_for_row(r: i32) -> Owner {
    if r < -1 {
        Owner::Player1
    } else if r > 1 {
        Owner::Player2
    } else {
        Owner::Neutral
    }
}

/// Hand-placed terrain features, stamped only where the coordinate exists
const MOUNTAINS: [(i32, i32); 2] = [(-4, -1), (-3, -2)];
const FORESTS: [(i32, i32); 2] = [(3, 2), (4, 1)];
const RIVER_HALF_LENGTH: i32 = 2;

/// Generate a board. Same dimensions always give the same board.
pub fn initialize_board(width: u32, height: u32) -> Board {
    let half_w = (width / 2) as i32;
    let half_h = (height / 2) as i32;

    let mut tiles = Vec::new();
    for q in -half_w..=half_w {
        let r1 = (-half_h).max(-q - half_h);
        let r2 = half_h.min(-q + half_h);
        for r in r1..=r2 {
            tiles.push(HexTile::new(Hex::new(q, r), territory_for_row(r)));
        }
    }

    let mut board = Board::from_tiles(tiles);

    for (q, r) in MOUNTAINS {
        board.set_terrain(Hex::new(q, r), Terrain::Mountain);
    }
    for (q, r) in FORESTS {
        board.set_terrain(Hex::new(q, r), Terrain::Forest);
    }
    for i in -RIVER_HALF_LENGTH..=RIVER_HALF_LENGTH {
        board.set_terrain(Hex::new(i, 0), Terrain::River);
    }

    board
}
