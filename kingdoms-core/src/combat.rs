//! Combat resolution
//!
//! Both blows land in the same exchange: the defender takes the attacker's
//! attack power and the attacker takes the defender's. The outcome is decided
//! only after both new hit point totals are known.

use std::cmp::Ordering;

use serde::Serialize;

use crate::units::Unit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    AttackerWins,
    DefenderWins,
    Draw,
}

/// Everything the caller needs to apply an exchange to the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombatReport {
    /// Damage taken by the attacker
    pub attacker_damage: i32,
    /// Damage taken by the defender
    pub defender_damage: i32,
    pub attacker_hp: i32,
    pub defender_hp: i32,
    pub outcome: CombatOutcome,
    pub log: Vec<String>,
}

impl CombatReport {
    pub fn attacker_removed(&self) -> bool {
        self.attacker_hp <= 0
    }

    pub fn defender_removed(&self) -> bool {
        self.defender_hp <= 0
    }
}

/// Resolve one exchange between two living units. Pure.
pub fn resolve_combat(attacker: &Unit, defender: &Unit) -> CombatReport {
    let attacker_damage = defender.attack_power;
    let defender_damage = attacker.attack_power;
    let attacker_hp = attacker.hit_points - attacker_damage;
    let defender_hp = defender.hit_points - defender_damage;

    let mut log = vec![
        format!("{} attacks {}.", attacker.name, defender.name),
        format!("{} deals {} damage to {}.", attacker.name, defender_damage, defender.name),
        format!("{} retaliates with {} damage to {}.", defender.name, attacker_damage, attacker.name),
        format!("{} has {} HP remaining.", attacker.name, attacker_hp),
        format!("{} has {} HP remaining.", defender.name, defender_hp),
    ];

    let outcome = match (attacker_hp > 0, defender_hp > 0) {
        (true, false) => {
            log.push(format!("{} is defeated!", defender.name));
            CombatOutcome::AttackerWins
        }
        (false, true) => {
            log.push(format!("{} is defeated!", attacker.name));
            CombatOutcome::DefenderWins
        }
        (false, false) => {
            log.push("Both units were defeated in combat!".to_string());
            CombatOutcome::Draw
        }
        (true, true) => {
            let ratio = compare_health(
                attacker_hp,
                attacker.max_hit_points,
                defender_hp,
                defender.max_hit_points,
            );
            match ratio {
                Ordering::Greater => CombatOutcome::AttackerWins,
                Ordering::Less => CombatOutcome::DefenderWins,
                Ordering::Equal => CombatOutcome::Draw,
            }
        }
    };

    log.push(match outcome {
        CombatOutcome::AttackerWins => format!("{} won the combat!", attacker.name),
        CombatOutcome::DefenderWins => format!("{} won the combat!", defender.name),
        CombatOutcome::Draw => "The combat ended in a draw!".to_string(),
    });

    CombatReport {
        attacker_damage,
        defender_damage,
        attacker_hp,
        defender_hp,
        outcome,
        log,
    }
}

/// Compare `a_hp / a_max` with `b_hp / b_max` exactly
fn compare_health(a_hp: i32, a_max: i32, b_hp: i32, b_max: i32) -> Ordering {
    let lhs = i64::from(a_hp) * i64::from(b_max.max(1));
    let rhs = i64::from(b_hp) * i64::from(a_max.max(1));
    lhs.cmp(&rhs)
}
