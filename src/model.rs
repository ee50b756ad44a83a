use crate::config::BattleConfig;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Type substituted when a template carries no type tags.
pub const DEFAULT_TYPE: &str = "normal";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default)]
    pub hp: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default, rename = "special-attack")]
    pub special_attack: u32,
    #[serde(default, rename = "special-defense")]
    pub special_defense: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub front_default: String,
    #[serde(default)]
    pub back_default: Option<String>,
}

/// A creature as supplied by the roster. Never mutated during a battle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    /// Type names, primary first. Accepts plain names or catalog slot
    /// objects (`{"slot": 1, "type": {"name": "fire"}}`); entries of any
    /// other shape are dropped.
    #[serde(default, deserialize_with = "type_names")]
    pub types: Vec<String>,
    #[serde(default, rename = "statsMap")]
    pub stats: BaseStats,
    #[serde(default)]
    pub sprites: Sprites,
}

impl CreatureTemplate {
    /// First type tag, or `normal` when the template has none.
    pub fn primary_type(&self) -> &str {
        self.types
            .first()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TYPE)
    }
}

/// Roster input. Team keys are `teamOne` / `teamTwo`; `team1` / `team2` and
/// `team_one` / `team_two` are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterFile {
    #[serde(alias = "team1", alias = "team_one")]
    pub team_one: Vec<CreatureTemplate>,
    #[serde(alias = "team2", alias = "team_two")]
    pub team_two: Vec<CreatureTemplate>,
    #[serde(default)]
    pub config: BattleConfig,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct TypeRef {
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeEntry {
    Name(String),
    Slot {
        #[serde(rename = "type")]
        kind: TypeRef,
    },
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeList {
    List(Vec<TypeEntry>),
    Other(IgnoredAny),
}

fn type_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let names = match TypeList::deserialize(deserializer)? {
        TypeList::List(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                TypeEntry::Name(name) => Some(name),
                TypeEntry::Slot { kind } => Some(kind.name),
                TypeEntry::Other(_) => None,
            })
            .collect(),
        TypeList::Other(_) => Vec::new(),
    };
    Ok(names)
}
