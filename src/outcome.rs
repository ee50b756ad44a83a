use crate::fighter::{Combatant, SlotKey, Team};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum BattleResult {
    TeamOneWins,
    TeamTwoWins,
    Draw,
}

impl From<Team> for BattleResult {
    fn from(team: Team) -> Self {
        match team {
            Team::One => BattleResult::TeamOneWins,
            Team::Two => BattleResult::TeamTwoWins,
        }
    }
}

pub fn team_alive(combatants: &BTreeMap<SlotKey, Combatant>, team: Team) -> bool {
    combatants
        .iter()
        .any(|(slot, c)| slot.team == team && c.is_alive())
}

/// Team two wins when team one is wiped; otherwise team one wins when team
/// two is wiped. Team one's wipe is checked first.
pub fn evaluate(combatants: &BTreeMap<SlotKey, Combatant>) -> Option<Team> {
    if !team_alive(combatants, Team::One) {
        return Some(Team::Two);
    }
    if !team_alive(combatants, Team::Two) {
        return Some(Team::One);
    }
    None
}
