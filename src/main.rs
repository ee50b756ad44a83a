use clap::Parser;
use creature_arena::config::TeamSize;
use creature_arena::{run, CliOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve a creature battle between two rosters.
#[derive(Debug, Parser)]
#[command(name = "creature-arena", version)]
struct Args {
    /// Roster JSON with `teamOne`, `teamTwo` and an optional `config` block.
    #[arg(long, default_value = "demos/roster.json")]
    roster: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
    /// 1 or 3.
    #[arg(long, value_parser = parse_team_size)]
    team_size: Option<TeamSize>,
    /// Report team one's win rate over N headless battles.
    #[arg(long)]
    sims: Option<usize>,
    /// Play one turn per turn delay instead of as fast as possible.
    #[arg(long)]
    paced: bool,
    #[arg(long)]
    turn_delay_ms: Option<u64>,
    /// Print JSON instead of plain narration.
    #[arg(long)]
    json: bool,
}

fn parse_team_size(raw: &str) -> Result<TeamSize, String> {
    let value: u8 = raw.parse().map_err(|e| format!("{e}"))?;
    TeamSize::try_from(value).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("creature_arena=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(CliOptions {
        roster_path: args.roster,
        seed: args.seed,
        team_size: args.team_size,
        turn_delay_ms: args.turn_delay_ms,
        sims: args.sims,
        paced: args.paced,
        json: args.json,
    })
}
