use crate::fighter::Combatant;
use crate::rolls::RandomSource;
use crate::status::StatusKind;
use crate::types::type_effectiveness;
use serde::Serialize;
use std::fmt;

pub const CRIT_CHANCE: f64 = 0.15;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const DAMAGE_SCALE: f64 = 25.0;
pub const BURN_ATTACK_PENALTY: f64 = 0.7;
pub const DRENCHED_MULTIPLIER: f64 = 1.3;
pub const SLOW_MULTIPLIER: f64 = 1.1;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackNote {
    Critical,
    SuperEffective,
    NotVeryEffective,
}

impl fmt::Display for AttackNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttackNote::Critical => "critical hit!",
            AttackNote::SuperEffective => "super effective!",
            AttackNote::NotVeryEffective => "not very effective...",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackOutcome {
    pub damage: u32,
    pub is_critical: bool,
    pub multiplier: f64,
    pub note: Option<AttackNote>,
}

/// Damage one attack would deal. Draws exactly one value (the critical roll)
/// from `rolls` and does not touch either combatant.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    rolls: &mut impl RandomSource,
) -> AttackOutcome {
    let mut offense = attacker.stats.attack.max(attacker.stats.special_attack) as f64;
    if attacker.status.has(StatusKind::Burn) {
        offense *= BURN_ATTACK_PENALTY;
    }
    // A zero defense only comes from a malformed template.
    let defense = defender
        .stats
        .defense
        .max(defender.stats.special_defense)
        .max(1) as f64;

    let mut base = offense / defense * DAMAGE_SCALE;

    let crit_draw = rolls.next_unit();
    let is_critical = crit_draw < CRIT_CHANCE;
    if is_critical {
        base *= CRIT_MULTIPLIER;
    }

    let multiplier = type_effectiveness(attacker.primary_type(), defender.primary_type());
    let mut total = (base * multiplier).floor();

    if defender.status.has(StatusKind::Drenched) {
        total = (total * DRENCHED_MULTIPLIER).floor();
    }
    if defender.status.has(StatusKind::Slow) {
        total = (total * SLOW_MULTIPLIER).floor();
    }

    let note = if is_critical {
        Some(AttackNote::Critical)
    } else if multiplier > 1.0 {
        Some(AttackNote::SuperEffective)
    } else if multiplier < 1.0 {
        Some(AttackNote::NotVeryEffective)
    } else {
        None
    };

    tracing::trace!(
        attacker = %attacker.name,
        defender = %defender.name,
        crit_draw,
        multiplier,
        "attack resolved"
    );

    AttackOutcome {
        damage: (total as u32).max(1),
        is_critical,
        multiplier,
        note,
    }
}
