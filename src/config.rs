use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of roster slots per team. Fixed for the whole match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamSize {
    One,
    Three,
}

impl TeamSize {
    pub fn slots(self) -> u8 {
        match self {
            TeamSize::One => 1,
            TeamSize::Three => 3,
        }
    }

    /// Smallest supported size that fits both rosters.
    pub fn fitting(team_one_len: usize, team_two_len: usize) -> TeamSize {
        if team_one_len.max(team_two_len) <= 1 {
            TeamSize::One
        } else {
            TeamSize::Three
        }
    }
}

impl TryFrom<u8> for TeamSize {
    type Error = RosterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamSize::One),
            3 => Ok(TeamSize::Three),
            other => Err(RosterError::UnsupportedTeamSize(other)),
        }
    }
}

impl From<TeamSize> for u8 {
    fn from(size: TeamSize) -> u8 {
        size.slots()
    }
}

fn default_turn_delay_ms() -> u64 {
    2000
}

fn default_effect_clear_ms() -> u64 {
    800
}

fn default_queue_preview_len() -> usize {
    5
}

fn default_max_turns() -> u32 {
    500
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Inferred from the roster lengths when absent.
    #[serde(default)]
    pub team_size: Option<TeamSize>,
    #[serde(default = "default_turn_delay_ms")]
    pub turn_delay_ms: u64,
    #[serde(default = "default_effect_clear_ms")]
    pub effect_clear_ms: u64,
    #[serde(default = "default_queue_preview_len")]
    pub queue_preview_len: usize,
    /// Upper bound on resolved turns for headless runs.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    #[serde(default)]
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            team_size: None,
            turn_delay_ms: default_turn_delay_ms(),
            effect_clear_ms: default_effect_clear_ms(),
            queue_preview_len: default_queue_preview_len(),
            max_turns: default_max_turns(),
            seed: 0,
        }
    }
}

impl BattleConfig {
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    pub fn effect_clear_delay(&self) -> Duration {
        Duration::from_millis(self.effect_clear_ms)
    }

    pub fn resolved_team_size(&self, team_one_len: usize, team_two_len: usize) -> TeamSize {
        self.team_size
            .unwrap_or_else(|| TeamSize::fitting(team_one_len, team_two_len))
    }
}
