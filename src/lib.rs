//! Turn-based creature battle engine.
//!
//! The entry point for stepping a match is [`battle::BattleSession`]; it owns
//! the state and resolves one speed-ordered turn per `advance_turn` call.
//! [`runner::BattleRunner`] paces a session against the wall clock.

pub mod battle;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod fighter;
pub mod matrix;
pub mod model;
pub mod narration;
pub mod outcome;
pub mod rolls;
pub mod runner;
pub mod scheduler;
pub mod status;
pub mod types;

use crate::battle::BattleSession;
use crate::config::TeamSize;
use crate::model::RosterFile;
use crate::runner::BattleRunner;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub mod prelude {
    pub use crate::battle::{BattleSession, BattleState, TurnOutcome, TurnReport};
    pub use crate::config::{BattleConfig, TeamSize};
    pub use crate::fighter::{Combatant, SlotKey, Team};
    pub use crate::model::CreatureTemplate;
    pub use crate::outcome::BattleResult;
    pub use crate::rolls::{RandomSource, ScriptedRolls, SeededRolls};
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub roster_path: PathBuf,
    pub seed: Option<u64>,
    pub team_size: Option<TeamSize>,
    pub turn_delay_ms: Option<u64>,
    pub sims: Option<usize>,
    pub paced: bool,
    pub json: bool,
}

pub fn load_roster(path: &Path) -> anyhow::Result<RosterFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
    let parsed: RosterFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(parsed)
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let mut roster = load_roster(&opts.roster_path)?;
    if let Some(seed) = opts.seed {
        roster.config.seed = seed;
    }
    if let Some(size) = opts.team_size {
        roster.config.team_size = Some(size);
    }
    if let Some(delay) = opts.turn_delay_ms {
        roster.config.turn_delay_ms = delay;
    }

    if let Some(sims) = opts.sims {
        if sims == 0 {
            anyhow::bail!("--sims must be > 0");
        }
        let rate = matrix::win_rate(
            &roster.team_one,
            &roster.team_two,
            &roster.config,
            sims,
            roster.config.seed,
        )?;
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&rate)?);
        } else {
            println!(
                "team 1 win rate over {} battles: {:.4} ({} wins, {} losses, {} draws)",
                rate.battles,
                rate.team_one_rate(),
                rate.team_one_wins,
                rate.team_two_wins,
                rate.draws
            );
        }
        return Ok(());
    }

    let session = BattleSession::new(&roster.team_one, &roster.team_two, roster.config.clone())
        .context("Invalid roster")?;
    if opts.paced {
        return run_paced(session);
    }

    let mut session = session;
    let result = session.run_to_completion();
    let state = session.state();
    if opts.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state.log.to_json(state.winner))?
        );
    } else {
        for line in state.log.chronological() {
            println!("{line}");
        }
        println!("result: {result:?} after {} turns", session.turn());
    }
    Ok(())
}

fn run_paced(session: BattleSession) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to build the async runtime")?;
    runtime.block_on(async move {
        let mut runner = BattleRunner::new(session);
        let shared = runner.session();
        let mut reports = runner.start().await;
        if let Some(line) = shared.lock().await.state().log.latest() {
            println!("{line}");
        }
        while let Some(report) = reports.recv().await {
            for line in &report.log {
                println!("{line}");
            }
            let session = shared.lock().await;
            if session.is_running() {
                let upcoming: Vec<String> = session
                    .turn_order_preview(session.config().queue_preview_len)
                    .into_iter()
                    .map(|entry| entry.name)
                    .collect();
                println!("  next: {}", upcoming.join(" > "));
            }
        }
        runner.finished().await;
    });
    Ok(())
}
