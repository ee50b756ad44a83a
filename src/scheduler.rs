use crate::fighter::{Combatant, SlotKey};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchedulerPhase {
    /// No queue has been computed (before start, after reset).
    Idle,
    Queued,
    /// Nobody is left to act.
    Exhausted,
}

/// Speed-ordered queue of live slots and the index of the slot to act next.
#[derive(Clone, Debug)]
pub struct TurnQueue {
    order: Vec<SlotKey>,
    index: usize,
    phase: SchedulerPhase,
}

impl Default for TurnQueue {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            index: 0,
            phase: SchedulerPhase::Idle,
        }
    }
}

/// Live slots, fastest first. `slot_order` is the fixed iteration order; the
/// sort is stable so equal speeds keep that order.
pub fn speed_order(
    combatants: &BTreeMap<SlotKey, Combatant>,
    slot_order: &[SlotKey],
) -> Vec<SlotKey> {
    let mut live: Vec<(SlotKey, u32)> = slot_order
        .iter()
        .filter_map(|slot| {
            combatants
                .get(slot)
                .filter(|c| c.is_alive())
                .map(|c| (*slot, c.speed()))
        })
        .collect();
    live.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));
    live.into_iter().map(|(slot, _)| slot).collect()
}

impl TurnQueue {
    /// Computes the first queue of a match, starting at its head.
    pub fn start(combatants: &BTreeMap<SlotKey, Combatant>, slot_order: &[SlotKey]) -> Self {
        let order = speed_order(combatants, slot_order);
        let phase = if order.is_empty() {
            SchedulerPhase::Exhausted
        } else {
            SchedulerPhase::Queued
        };
        Self {
            order,
            index: 0,
            phase,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn order(&self) -> &[SlotKey] {
        &self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<SlotKey> {
        self.order.get(self.index).copied()
    }

    /// Rebuilds the queue from the live combatants and moves one step forward.
    ///
    /// The index advances relative to the new queue, wrapping modulo its
    /// length, and is 0 when nobody is left.
    pub fn recompute_and_advance(
        &mut self,
        combatants: &BTreeMap<SlotKey, Combatant>,
        slot_order: &[SlotKey],
    ) {
        self.order = speed_order(combatants, slot_order);
        if self.order.is_empty() {
            self.index = 0;
            self.phase = SchedulerPhase::Exhausted;
        } else {
            self.index = (self.index + 1) % self.order.len();
            self.phase = SchedulerPhase::Queued;
        }
    }

    /// Up to `len` upcoming live slots, starting with the current actor.
    /// The bool marks the current actor.
    pub fn preview(
        &self,
        combatants: &BTreeMap<SlotKey, Combatant>,
        len: usize,
    ) -> Vec<(SlotKey, bool)> {
        let live: Vec<SlotKey> = self
            .order
            .iter()
            .copied()
            .filter(|slot| combatants.get(slot).is_some_and(Combatant::is_alive))
            .collect();
        if live.is_empty() {
            return Vec::new();
        }
        let start = self
            .current()
            .and_then(|current| live.iter().position(|slot| *slot == current))
            .unwrap_or(0);
        live.iter()
            .cycle()
            .skip(start)
            .take(len.min(live.len()))
            .enumerate()
            .map(|(idx, slot)| (*slot, idx == 0))
            .collect()
    }
}
