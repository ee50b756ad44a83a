use crate::fighter::Team;
use serde::Serialize;
use serde_json::json;

pub const WAITING_LINE: &str = "Waiting for the battle to start...";
pub const START_LINE: &str = "The battle begins! Turn order is set by speed.";

/// Turn-by-turn narration, newest line first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Narration {
    lines: Vec<String>,
}

impl Default for Narration {
    fn default() -> Self {
        Self::waiting()
    }
}

impl Narration {
    pub fn waiting() -> Self {
        Self {
            lines: vec![WAITING_LINE.to_string()],
        }
    }

    pub fn started() -> Self {
        Self {
            lines: vec![START_LINE.to_string()],
        }
    }

    fn push(&mut self, line: String) {
        self.lines.insert(0, line);
    }

    pub fn log_attack(&mut self, attacker: &str, defender: &str, damage: u32, note: Option<&str>) {
        let mut line = format!("{attacker} attacks {defender} for {damage} damage.");
        if let Some(note) = note {
            line.push_str(&format!(" ({note})"));
        }
        self.push(line);
    }

    pub fn log_dot(&mut self, name: &str, status: &str, damage: u32) {
        self.push(format!("{name} takes {damage} damage from {status}."));
    }

    pub fn log_status_faint(&mut self, name: &str) {
        self.push(format!("{name} collapses from status damage!"));
    }

    pub fn log_status(&mut self, name: &str, text: &str) {
        self.push(format!("{name} {text}"));
    }

    pub fn log_faint(&mut self, name: &str) {
        self.push(format!("{name} faints!"));
    }

    pub fn log_win(&mut self, winner: Team) {
        self.push(format!("Team {} wins the battle!", winner.number()));
    }

    /// Newest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Oldest first.
    pub fn chronological(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().rev().map(String::as_str)
    }

    pub fn to_json(&self, winner: Option<Team>) -> serde_json::Value {
        let log: Vec<&str> = self.chronological().collect();
        json!({
            "log": log,
            "winner": winner.map(Team::number),
        })
    }
}
