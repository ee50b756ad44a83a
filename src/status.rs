use crate::fighter::Combatant;
use crate::rolls::RandomSource;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Inclusive upper bound of the status roll: `draw <= 0.4` inflicts.
pub const STATUS_CHANCE: f64 = 0.4;
pub const BURN_TICK_FRACTION: f64 = 0.05;
pub const POISON_TICK_FRACTION: f64 = 0.08;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Burn,
    Poison,
    Confusion,
    Paralysis,
    Slow,
    Drenched,
}

impl StatusKind {
    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Burn => "burn",
            StatusKind::Poison => "poison",
            StatusKind::Confusion => "confusion",
            StatusKind::Paralysis => "paralysis",
            StatusKind::Slow => "slow",
            StatusKind::Drenched => "drenched",
        }
    }

    /// Narration fragment, e.g. "Charmander is burning!".
    pub fn inflicted_text(self) -> &'static str {
        match self {
            StatusKind::Burn => "is burning!",
            StatusKind::Poison => "is poisoned!",
            StatusKind::Confusion => "is confused!",
            StatusKind::Paralysis => "is paralyzed!",
            StatusKind::Slow => "is frozen stiff!",
            StatusKind::Drenched => "is drenched!",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Attacker primary type -> status it can inflict.
static INFLICTED_BY_TYPE: phf::Map<&'static str, StatusKind> = phf_map! {
    "fire" => StatusKind::Burn,
    "poison" => StatusKind::Poison,
    "electric" => StatusKind::Paralysis,
    "ice" => StatusKind::Slow,
    "water" => StatusKind::Drenched,
    "psychic" => StatusKind::Confusion,
};

pub fn status_for_type(primary_type: &str) -> Option<StatusKind> {
    INFLICTED_BY_TYPE
        .get(primary_type.to_ascii_lowercase().as_str())
        .copied()
}

/// Statuses currently carried by a combatant. Statuses never expire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusSet(BTreeSet<StatusKind>);

impl StatusSet {
    pub fn has(&self, kind: StatusKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusKind> + '_ {
        self.0.iter().copied()
    }

    /// Builds a set carrying exactly `kinds`, bypassing [`StatusSet::inflict`].
    /// Battles never produce more than one status; this exists for fixtures
    /// that need stacked statuses.
    #[doc(hidden)]
    pub fn preloaded(kinds: impl IntoIterator<Item = StatusKind>) -> Self {
        StatusSet(kinds.into_iter().collect())
    }

    /// First writer wins: lands only when nothing is carried yet.
    pub fn inflict(&mut self, kind: StatusKind) -> bool {
        if !self.0.is_empty() {
            return false;
        }
        self.0.insert(kind)
    }
}

/// Rolls whether the attacker's hit carries a status.
///
/// The draw is consumed on every call, even for attackers whose type inflicts
/// nothing, so the roll sequence does not depend on the roster's types.
pub fn try_inflict_status(attacker: &Combatant, rolls: &mut impl RandomSource) -> Option<StatusKind> {
    let draw = rolls.next_unit();
    tracing::trace!(attacker = %attacker.name, draw, "status roll");
    if draw > STATUS_CHANCE {
        return None;
    }
    status_for_type(attacker.primary_type())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DotTick {
    pub kind: StatusKind,
    pub damage: u32,
    pub fainted: bool,
}

/// Damage-over-time applied before the combatant acts. Burn is checked before
/// poison. A tick that would deal nothing is not reported.
pub fn apply_start_of_turn_status(combatant: &mut Combatant) -> Option<DotTick> {
    let (kind, fraction) = if combatant.status.has(StatusKind::Burn) {
        (StatusKind::Burn, BURN_TICK_FRACTION)
    } else if combatant.status.has(StatusKind::Poison) {
        (StatusKind::Poison, POISON_TICK_FRACTION)
    } else {
        return None;
    };
    let damage = (combatant.initial_hp as f64 * fraction).floor() as u32;
    if damage == 0 {
        return None;
    }
    combatant.take_damage(damage);
    Some(DotTick {
        kind,
        damage,
        fainted: !combatant.is_alive(),
    })
}
