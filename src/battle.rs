//! The battle session: owns every piece of mutable match state and resolves
//! one turn per [`BattleSession::advance_turn`] call.

use crate::combat::{resolve_attack, AttackOutcome};
use crate::config::{BattleConfig, TeamSize};
use crate::error::RosterError;
use crate::events::{AnimationCue, DamageKind, PresentationEvents};
use crate::fighter::{Combatant, SlotKey, Team};
use crate::model::CreatureTemplate;
use crate::narration::Narration;
use crate::outcome::{evaluate, BattleResult};
use crate::rolls::{RandomSource, SeededRolls};
use crate::scheduler::{SchedulerPhase, TurnQueue};
use crate::status::{apply_start_of_turn_status, try_inflict_status, DotTick, StatusKind};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleState {
    pub combatants: BTreeMap<SlotKey, Combatant>,
    pub active: bool,
    pub winner: Option<Team>,
    pub log: Narration,
}

impl BattleState {
    fn fresh(team_one: &[CreatureTemplate], team_two: &[CreatureTemplate], log: Narration) -> Self {
        let mut combatants = BTreeMap::new();
        for (team, roster) in [(Team::One, team_one), (Team::Two, team_two)] {
            for (idx, template) in roster.iter().enumerate() {
                let slot = SlotKey::new(team, idx as u8 + 1);
                combatants.insert(slot, Combatant::from_template(template));
            }
        }
        BattleState {
            combatants,
            active: false,
            winner: None,
            log,
        }
    }

    pub fn combatant(&self, slot: SlotKey) -> Option<&Combatant> {
        self.combatants.get(&slot)
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// Position currently engaged on each team.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FrontSlots {
    pub team_one: u8,
    pub team_two: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    pub slot: SlotKey,
    pub name: String,
    pub sprite: String,
    pub is_current: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Battle not running or already decided; nothing happened.
    Idle,
    /// The scheduled slot had already fainted; the queue was rebuilt.
    Skipped,
    /// The actor fainted from damage-over-time before it could attack.
    FellToStatus,
    /// The opposing team had nobody left to target; the battle stopped.
    NoTarget,
    Attacked,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct HpChange {
    pub slot: SlotKey,
    pub before: u32,
    pub after: u32,
}

/// Everything a single call to [`BattleSession::advance_turn`] changed.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub turn: u32,
    pub outcome: TurnOutcome,
    pub actor: Option<SlotKey>,
    /// Turns the actor has started so far, this one included. 0 when nobody acted.
    pub actor_turns: u32,
    pub defender: Option<SlotKey>,
    pub dot: Option<DotTick>,
    pub attack: Option<AttackOutcome>,
    pub inflicted: Option<StatusKind>,
    pub hp_changes: Vec<HpChange>,
    pub fainted: Vec<SlotKey>,
    pub queue: Vec<SlotKey>,
    pub winner: Option<Team>,
    /// Narration lines added this turn, oldest first.
    pub log: Vec<String>,
}

impl TurnReport {
    fn new(turn: u32, outcome: TurnOutcome) -> Self {
        TurnReport {
            turn,
            outcome,
            actor: None,
            actor_turns: 0,
            defender: None,
            dot: None,
            attack: None,
            inflicted: None,
            hp_changes: Vec::new(),
            fainted: Vec::new(),
            queue: Vec::new(),
            winner: None,
            log: Vec::new(),
        }
    }
}

pub struct BattleSession<R: RandomSource = SeededRolls> {
    team_one: Vec<CreatureTemplate>,
    team_two: Vec<CreatureTemplate>,
    team_size: TeamSize,
    slot_order: Vec<SlotKey>,
    config: BattleConfig,
    state: BattleState,
    queue: TurnQueue,
    events: PresentationEvents,
    rolls: R,
    turn: u32,
    generation: u64,
}

impl BattleSession<SeededRolls> {
    /// Session seeded from `config.seed`.
    pub fn new(
        team_one: &[CreatureTemplate],
        team_two: &[CreatureTemplate],
        config: BattleConfig,
    ) -> Result<Self, RosterError> {
        let rolls = SeededRolls::from_seed(config.seed);
        Self::with_rolls(team_one, team_two, config, rolls)
    }
}

impl<R: RandomSource> BattleSession<R> {
    pub fn with_rolls(
        team_one: &[CreatureTemplate],
        team_two: &[CreatureTemplate],
        config: BattleConfig,
        rolls: R,
    ) -> Result<Self, RosterError> {
        let team_size = config.resolved_team_size(team_one.len(), team_two.len());
        validate_team(Team::One, team_one, team_size)?;
        validate_team(Team::Two, team_two, team_size)?;
        Ok(BattleSession {
            team_one: team_one.to_vec(),
            team_two: team_two.to_vec(),
            team_size,
            slot_order: SlotKey::all(team_size).collect(),
            config,
            state: BattleState::fresh(team_one, team_two, Narration::waiting()),
            queue: TurnQueue::default(),
            events: PresentationEvents::default(),
            rolls,
            turn: 0,
            generation: 0,
        })
    }

    /// Builds fresh combatants, computes the opening queue and activates the battle.
    pub fn start(&mut self) {
        self.state = BattleState::fresh(&self.team_one, &self.team_two, Narration::started());
        self.state.active = true;
        self.queue = TurnQueue::start(&self.state.combatants, &self.slot_order);
        self.events.reset();
        self.turn = 0;
        self.generation += 1;
        info!(
            generation = self.generation,
            team_size = self.team_size.slots(),
            queue = ?self.queue.order(),
            "battle started"
        );
    }

    /// Back to the pre-battle state: fresh combatants, no queue, no events.
    pub fn reset(&mut self) {
        self.state = BattleState::fresh(&self.team_one, &self.team_two, Narration::waiting());
        self.queue.clear();
        self.events.reset();
        self.turn = 0;
        self.generation += 1;
        info!(generation = self.generation, "battle reset");
    }

    /// Stops a running battle without touching combatants or the log.
    pub fn stop(&mut self) {
        self.state.active = false;
        self.generation += 1;
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn events(&self) -> &PresentationEvents {
        &self.events
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn team_size(&self) -> TeamSize {
        self.team_size
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Bumped by every start, reset and stop. Timers armed under an older
    /// generation must not act.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn queue(&self) -> &TurnQueue {
        &self.queue
    }

    pub fn is_running(&self) -> bool {
        self.state.active && self.state.winner.is_none()
    }

    /// Clears presentation events, unless a later turn has replaced them.
    pub fn clear_events_for_turn(&mut self, turn: u32) -> bool {
        self.events.clear_if_turn(turn)
    }

    /// Lowest alive position on `team`.
    pub fn front_slot(&self, team: Team) -> Option<SlotKey> {
        (1..=self.team_size.slots())
            .map(|position| SlotKey::new(team, position))
            .find(|slot| self.state.combatants.get(slot).is_some_and(Combatant::is_alive))
    }

    /// Engaged position per team; a wiped team reports position 1.
    pub fn active_front_slots(&self) -> FrontSlots {
        let position = |team| self.front_slot(team).map_or(1, |slot| slot.position);
        FrontSlots {
            team_one: position(Team::One),
            team_two: position(Team::Two),
        }
    }

    pub fn turn_order_preview(&self, len: usize) -> Vec<QueueEntry> {
        self.queue
            .preview(&self.state.combatants, len)
            .into_iter()
            .filter_map(|(slot, is_current)| {
                self.state.combatants.get(&slot).map(|c| QueueEntry {
                    slot,
                    name: c.name.clone(),
                    sprite: c.sprite_front.clone(),
                    is_current,
                })
            })
            .collect()
    }

    /// Resolves one turn. Calling it on an inactive or decided battle is a no-op.
    pub fn advance_turn(&mut self) -> TurnReport {
        if !self.is_running() {
            return TurnReport::new(self.turn, TurnOutcome::Idle);
        }
        self.turn += 1;
        let log_mark = self.state.log.len();
        self.events.mark_turn(self.turn);

        let scheduled = self.queue.current();
        let actor_slot = match scheduled
            .filter(|slot| self.state.combatants.get(slot).is_some_and(Combatant::is_alive))
        {
            Some(slot) => slot,
            None => {
                debug!(turn = self.turn, slot = ?scheduled, "stale queue entry, recomputing");
                let mut report = TurnReport::new(self.turn, TurnOutcome::Skipped);
                report.actor = scheduled;
                return self.finish_turn(report, log_mark);
            }
        };

        let mut report = TurnReport::new(self.turn, TurnOutcome::Attacked);
        report.actor = Some(actor_slot);

        let Some(actor) = self.state.combatants.get_mut(&actor_slot) else {
            report.outcome = TurnOutcome::Skipped;
            return self.finish_turn(report, log_mark);
        };
        actor.turns_taken += 1;
        report.actor_turns = actor.turns_taken;
        let hp_before = actor.current_hp;
        if let Some(tick) = apply_start_of_turn_status(actor) {
            self.state.log.log_dot(&actor.name, tick.kind.label(), tick.damage);
            self.events.push_damage(actor_slot, tick.damage, DamageKind::Dot);
            report.hp_changes.push(HpChange {
                slot: actor_slot,
                before: hp_before,
                after: actor.current_hp,
            });
            report.dot = Some(tick);
            if tick.fainted {
                self.state.log.log_status_faint(&actor.name);
                debug!(turn = self.turn, actor = %actor_slot, status = %tick.kind, "fainted from status");
                report.fainted.push(actor_slot);
                report.outcome = TurnOutcome::FellToStatus;
                return self.finish_turn(report, log_mark);
            }
        }

        let Some(defender_slot) = self.front_slot(actor_slot.team.opponent()) else {
            self.state.active = false;
            self.set_winner(evaluate(&self.state.combatants));
            report.outcome = TurnOutcome::NoTarget;
            report.winner = self.state.winner;
            report.queue = self.queue.order().to_vec();
            report.log = self.new_lines(log_mark);
            return report;
        };
        report.defender = Some(defender_slot);

        let (Some(attacker), Some(defender)) = (
            self.state.combatants.get(&actor_slot),
            self.state.combatants.get(&defender_slot),
        ) else {
            return self.finish_turn(report, log_mark);
        };
        let attack = resolve_attack(attacker, defender, &mut self.rolls);
        let inflicted = try_inflict_status(attacker, &mut self.rolls);
        let attacker_name = attacker.name.clone();

        let Some(defender) = self.state.combatants.get_mut(&defender_slot) else {
            return self.finish_turn(report, log_mark);
        };
        let before = defender.current_hp;
        defender.take_damage(attack.damage);
        report.hp_changes.push(HpChange {
            slot: defender_slot,
            before,
            after: defender.current_hp,
        });
        let note = attack.note.map(|n| n.to_string());
        self.state
            .log
            .log_attack(&attacker_name, &defender.name, attack.damage, note.as_deref());
        let kind = if attack.is_critical {
            DamageKind::Critical
        } else {
            DamageKind::Normal
        };
        self.events.push_damage(defender_slot, attack.damage, kind);
        self.events
            .set_animation(actor_slot, AnimationCue::Attack(actor_slot.team));
        self.events.set_animation(defender_slot, AnimationCue::Hit);

        if let Some(status) = inflicted {
            if defender.status.inflict(status) {
                self.state.log.log_status(&defender.name, status.inflicted_text());
                report.inflicted = Some(status);
            }
        }
        if !defender.is_alive() {
            self.state.log.log_faint(&defender.name);
            report.fainted.push(defender_slot);
        }
        debug!(
            turn = self.turn,
            actor = %actor_slot,
            defender = %defender_slot,
            damage = attack.damage,
            critical = attack.is_critical,
            status = ?report.inflicted,
            "attack"
        );
        report.attack = Some(attack);
        self.finish_turn(report, log_mark)
    }

    /// Plays the battle headlessly until it is decided, stalls, or hits
    /// `max_turns`. Starts the battle first if it was never started.
    pub fn run_to_completion(&mut self) -> BattleResult {
        if !self.state.active && self.turn == 0 {
            self.start();
        }
        while self.is_running() && self.turn < self.config.max_turns {
            if self.advance_turn().outcome == TurnOutcome::Idle {
                break;
            }
        }
        self.state.winner.map_or(BattleResult::Draw, BattleResult::from)
    }

    fn finish_turn(&mut self, mut report: TurnReport, log_mark: usize) -> TurnReport {
        self.queue
            .recompute_and_advance(&self.state.combatants, &self.slot_order);
        self.set_winner(evaluate(&self.state.combatants));
        if self.queue.phase() == SchedulerPhase::Exhausted && self.state.winner.is_none() {
            self.state.active = false;
        }
        report.queue = self.queue.order().to_vec();
        report.winner = self.state.winner;
        report.log = self.new_lines(log_mark);
        report
    }

    fn set_winner(&mut self, winner: Option<Team>) {
        if let (None, Some(team)) = (self.state.winner, winner) {
            self.state.log.log_win(team);
            info!(turn = self.turn, winner = %team, "battle decided");
        }
        self.state.winner = winner;
    }

    fn new_lines(&self, log_mark: usize) -> Vec<String> {
        let added = self.state.log.len().saturating_sub(log_mark);
        self.state.log.lines()[..added].iter().rev().cloned().collect()
    }
}

fn validate_team(team: Team, roster: &[CreatureTemplate], size: TeamSize) -> Result<(), RosterError> {
    if roster.is_empty() {
        return Err(RosterError::EmptyTeam(team));
    }
    if roster.len() > size.slots() as usize {
        return Err(RosterError::TeamTooLarge {
            team,
            len: roster.len(),
            max: size.slots(),
        });
    }
    Ok(())
}

/// Runs one headless match from a fresh session.
pub fn simulate_battle(
    team_one: &[CreatureTemplate],
    team_two: &[CreatureTemplate],
    config: &BattleConfig,
    seed: u64,
) -> Result<BattleResult, RosterError> {
    let config = BattleConfig {
        seed,
        ..config.clone()
    };
    let mut session = BattleSession::new(team_one, team_two, config)?;
    session.start();
    Ok(session.run_to_completion())
}
