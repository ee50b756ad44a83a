//! Transient cues for an external renderer: animation classes and floating
//! damage numbers. Nothing here feeds back into the simulation.

use crate::fighter::{SlotKey, Team};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageKind {
    Normal,
    Critical,
    Dot,
    Heal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DamageNumber {
    pub amount: u32,
    pub kind: DamageKind,
    pub is_critical: bool,
    /// Monotonic sequence number, for de-duplication and ordering.
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCue {
    Attack(Team),
    Hit,
}

impl AnimationCue {
    pub fn class_name(self) -> &'static str {
        match self {
            AnimationCue::Attack(Team::One) => "anim-attack-p1",
            AnimationCue::Attack(Team::Two) => "anim-attack-p2",
            AnimationCue::Hit => "anim-hit",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PresentationEvents {
    animations: BTreeMap<SlotKey, AnimationCue>,
    damage: BTreeMap<SlotKey, Vec<DamageNumber>>,
    next_timestamp: u64,
    /// Turn number that last touched this board.
    turn: u32,
}

impl PresentationEvents {
    pub fn animation(&self, slot: SlotKey) -> Option<AnimationCue> {
        self.animations.get(&slot).copied()
    }

    pub fn animations(&self) -> &BTreeMap<SlotKey, AnimationCue> {
        &self.animations
    }

    pub fn damage_numbers(&self, slot: SlotKey) -> &[DamageNumber] {
        self.damage.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty() && self.damage.is_empty()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub(crate) fn mark_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub(crate) fn push_damage(&mut self, slot: SlotKey, amount: u32, kind: DamageKind) -> DamageNumber {
        let number = DamageNumber {
            amount,
            kind,
            is_critical: kind == DamageKind::Critical,
            timestamp: self.next_timestamp,
        };
        self.next_timestamp += 1;
        self.damage.entry(slot).or_default().push(number);
        number
    }

    pub(crate) fn set_animation(&mut self, slot: SlotKey, cue: AnimationCue) {
        self.animations.insert(slot, cue);
    }

    /// Drops every cue and number. The timestamp sequence keeps counting.
    pub fn clear(&mut self) {
        self.animations.clear();
        self.damage.clear();
    }

    /// Clears only if no later turn has written to the board since `turn`.
    pub fn clear_if_turn(&mut self, turn: u32) -> bool {
        if self.turn != turn {
            return false;
        }
        self.clear();
        true
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
