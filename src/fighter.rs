use crate::config::TeamSize;
use crate::model::{BaseStats, CreatureTemplate};
use crate::status::StatusSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hit points are scaled up from the template so fights last longer.
pub const HP_MULTIPLIER: u32 = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.number())
    }
}

/// Stable address of a roster position. Positions are 1-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SlotKey {
    pub team: Team,
    pub position: u8,
}

impl SlotKey {
    pub fn new(team: Team, position: u8) -> Self {
        Self { team, position }
    }

    /// Every slot of a match, in the fixed iteration order used for speed
    /// tie-breaks: position-major, team one before team two.
    pub fn all(size: TeamSize) -> impl Iterator<Item = SlotKey> {
        (1..=size.slots()).flat_map(|position| {
            [Team::One, Team::Two]
                .into_iter()
                .map(move |team| SlotKey::new(team, position))
        })
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}-{}", self.team.number(), self.position)
    }
}

// Serialized as its display label so it can key JSON maps.
impl Serialize for SlotKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// In-battle instance of a creature template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub stats: BaseStats,
    pub sprite_front: String,
    pub sprite_back: String,
    pub initial_hp: u32,
    pub current_hp: u32,
    pub status: StatusSet,
    pub turns_taken: u32,
}

impl Combatant {
    pub fn from_template(template: &CreatureTemplate) -> Self {
        let initial_hp = template.stats.hp.saturating_mul(HP_MULTIPLIER);
        let front = template.sprites.front_default.clone();
        let back = template
            .sprites
            .back_default
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| front.clone());
        Combatant {
            id: template.id,
            name: template.name.clone(),
            types: template.types.clone(),
            stats: template.stats.clone(),
            sprite_front: front,
            sprite_back: back,
            initial_hp,
            current_hp: initial_hp,
            status: StatusSet::default(),
            turns_taken: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn primary_type(&self) -> &str {
        self.types
            .first()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(crate::model::DEFAULT_TYPE)
    }

    pub fn speed(&self) -> u32 {
        self.stats.speed
    }

    /// Subtracts `damage`, saturating at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_sub(damage);
        before - self.current_hp
    }
}
