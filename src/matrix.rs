use crate::battle::simulate_battle;
use crate::config::BattleConfig;
use crate::error::RosterError;
use crate::model::CreatureTemplate;
use crate::outcome::BattleResult;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct WinRate {
    pub battles: usize,
    pub team_one_wins: usize,
    pub team_two_wins: usize,
    pub draws: usize,
}

impl WinRate {
    fn record(mut self, result: BattleResult) -> Self {
        self.battles += 1;
        match result {
            BattleResult::TeamOneWins => self.team_one_wins += 1,
            BattleResult::TeamTwoWins => self.team_two_wins += 1,
            BattleResult::Draw => self.draws += 1,
        }
        self
    }

    /// Team one's share of battles, draws counting half.
    pub fn team_one_rate(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        (self.team_one_wins as f64 + 0.5 * self.draws as f64) / self.battles as f64
    }
}

/// Seed of the `index`-th battle of a batch. Independent of scheduling order.
pub fn battle_seed(base_seed: u64, index: usize) -> u64 {
    let mut rng = SmallRng::seed_from_u64(base_seed ^ ((index as u64) << 32) ^ index as u64);
    rng.gen()
}

/// Plays `sims` independent battles in parallel and tallies the results.
pub fn win_rate(
    team_one: &[CreatureTemplate],
    team_two: &[CreatureTemplate],
    config: &BattleConfig,
    sims: usize,
    seed: u64,
) -> Result<WinRate, RosterError> {
    let results: Vec<BattleResult> = (0..sims)
        .into_par_iter()
        .map(|index| simulate_battle(team_one, team_two, config, battle_seed(seed, index)))
        .collect::<Result<Vec<_>, RosterError>>()?;
    Ok(results
        .into_iter()
        .fold(WinRate::default(), WinRate::record))
}
