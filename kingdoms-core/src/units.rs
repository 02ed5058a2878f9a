//! Nations, unit templates and buildings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resources::ResourceKind;

/// Playable nations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nation {
    Altaria,
    Cartasia,
    Durandur,
    Belaklara,
    Void,
}

impl Nation {
    pub fn name(self) -> &'static str {
        match self {
            Nation::Altaria => "Altaria",
            Nation::Cartasia => "Cartasia",
            Nation::Durandur => "Durandur",
            Nation::Belaklara => "Belaklara",
            Nation::Void => "Void",
        }
    }

    /// Resource kinds this nation works with; the first one is its primary
    pub fn resources(self) -> &'static [ResourceKind] {
        match self {
            Nation::Altaria => &[ResourceKind::Faith],
            Nation::Cartasia => &[ResourceKind::Blood],
            Nation::Durandur => &[ResourceKind::Magic],
            Nation::Belaklara => &[ResourceKind::Gold],
            Nation::Void => &[ResourceKind::Chaos],
        }
    }

    pub fn primary_resource(self) -> ResourceKind {
        self.resources()[0]
    }

    /// The capital template this nation founds, if it has one
    pub fn capital_template(self) -> Option<&'static UnitTemplate> {
        UNIT_TEMPLATES
            .iter()
            .find(|t| t.unit_type == UnitType::Capital && t.faction == Faction::Nation(self))
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Allegiance of a unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Nation(Nation),
    Neutral,
}

impl From<Nation> for Faction {
    fn from(nation: Nation) -> Self {
        Faction::Nation(nation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Infantry,
    Archer,
    Cavalry,
    Mage,
    Hero,
    Capital,
}

/// A unit standing on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub unit_type: UnitType,
    pub faction: Faction,
    pub attack_power: i32,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub movement: u32,
    pub range: u32,
    pub abilities: Vec<String>,
}

impl Unit {
    pub fn is_capital(&self) -> bool {
        self.unit_type == UnitType::Capital
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    pub fn belongs_to(&self, nation: Nation) -> bool {
        self.faction == Faction::Nation(nation)
    }
}

/// Static unit definition
#[derive(Clone, Debug)]
pub struct UnitTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub unit_type: UnitType,
    pub faction: Faction,
    pub attack_power: i32,
    pub hit_points: i32,
    pub movement: u32,
    pub range: u32,
    pub abilities: &'static [&'static str],
    pub description: &'static str,
}

impl UnitTemplate {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        id: &'static str,
        name: &'static str,
        unit_type: UnitType,
        nation: Nation,
        attack_power: i32,
        hit_points: i32,
        movement: u32,
        range: u32,
        abilities: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            unit_type,
            faction: Faction::Nation(nation),
            attack_power,
            hit_points,
            movement,
            range,
            abilities,
            description,
        }
    }

    /// Fresh unit at full health. The id is the template id until placement
    /// stamps it.
    pub fn instantiate(&self) -> Unit {
        Unit {
            id: self.id.to_string(),
            name: self.name.to_string(),
            unit_type: self.unit_type,
            faction: self.faction,
            attack_power: self.attack_power,
            hit_points: self.hit_points,
            max_hit_points: self.hit_points,
            movement: self.movement,
            range: self.range,
            abilities: self.abilities.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// All unit templates
pub static UNIT_TEMPLATES: [UnitTemplate; 8] = [
    // Altaria (faith)
    UnitTemplate::new("altaria-infantry", "Faith Warrior", UnitType::Infantry, Nation::Altaria,
        2, 3, 2, 1, &["divine_shield"], "Basic Altaria infantry protected by divine light"),
    UnitTemplate::new("altaria-archer", "Lightbringer Archer", UnitType::Archer, Nation::Altaria,
        3, 2, 2, 2, &[], "Ranged unit blessed with the power of light"),
    UnitTemplate::new("altaria-mage", "Divine Mage", UnitType::Mage, Nation::Altaria,
        3, 2, 1, 2, &["healing_light"], "Can heal adjacent friendly units"),
    UnitTemplate::new("altaria-capital", "Divine Citadel", UnitType::Capital, Nation::Altaria,
        0, 15, 0, 0, &["faith_generation"], "The sacred capital of Altaria"),
    // Cartasia (blood)
    UnitTemplate::new("cartasia-infantry", "Blood Warrior", UnitType::Infantry, Nation::Cartasia,
        3, 2, 2, 1, &["bloodthirst"], "Basic Cartasia infantry with aggressive tactics"),
    UnitTemplate::new("cartasia-archer", "Shadow Archer", UnitType::Archer, Nation::Cartasia,
        2, 2, 2, 3, &[], "Long-range unit that can attack from the shadows"),
    UnitTemplate::new("cartasia-mage", "Blood Mage", UnitType::Mage, Nation::Cartasia,
        4, 1, 1, 2, &["life_drain"], "Can drain life from enemies to heal itself"),
    UnitTemplate::new("cartasia-capital", "Bloodkeep", UnitType::Capital, Nation::Cartasia,
        0, 15, 0, 0, &["blood_generation"], "The dark capital of Cartasia"),
];

/// Look up a template by id
pub fn get_template(id: &str) -> Option<&'static UnitTemplate> {
    UNIT_TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates a nation may deploy during development (capitals excluded)
pub fn deployable_templates(nation: Nation) -> impl Iterator<Item = &'static UnitTemplate> {
    UNIT_TEMPLATES
        .iter()
        .filter(move |t| t.faction == Faction::Nation(nation) && t.unit_type != UnitType::Capital)
}

// ============================================================================
// BUILDINGS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Resource,
    Defense,
    Utility,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub kind: BuildingKind,
    pub owner: Nation,
}

impl Building {
    pub fn new(name: impl Into<String>, kind: BuildingKind, owner: Nation) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase().replace(' ', "-"),
            name,
            kind,
            owner,
        }
    }
}
