use crate::fighter::Team;
use thiserror::Error;

/// Problems with a roster that prevent a match from being set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("{0} has no creatures")]
    EmptyTeam(Team),
    #[error("{team} has {len} creatures but the match allows {max}")]
    TeamTooLarge { team: Team, len: usize, max: u8 },
    #[error("team size must be 1 or 3, got {0}")]
    UnsupportedTeamSize(u8),
}
