//! Player records, squad loading and the short-id lookup book.
//!
//! Squad files are lenient JSON: stat fields may be numbers, strings
//! (possibly starred, `"123*"`), empty strings or null, and boundary counts
//! may arrive as `4s`/`6s`. Everything missing falls back to a documented
//! neutral default downstream; loading never fails on a malformed stat.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[cfg(test)]
mod tests;

/// Career batting figures. All fields optional or zero for unknown players.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingRecord {
    pub strike_rate: Option<f64>,
    pub average: Option<f64>,
    pub runs: f64,
    pub balls_faced: f64,
    pub fours: u32,
    pub sixes: u32,
}

/// Career bowling figures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BowlingRecord {
    pub economy: Option<f64>,
    pub average: Option<f64>,
    pub wickets: u32,
    pub overs_bowled: f64,
    pub runs_conceded: f64,
}

/// A roster member. `statless` is derived once at load time so the simulator
/// never has to sniff for empty fields mid-innings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub batting: BattingRecord,
    pub bowling: BowlingRecord,
    pub statless: bool,
}

impl Player {
    pub fn from_records(
        id: impl Into<String>,
        name: impl Into<String>,
        batting: BattingRecord,
        bowling: BowlingRecord,
    ) -> Self {
        let statless = is_statless(&batting, &bowling);
        Self {
            id: id.into(),
            name: name.into(),
            batting,
            bowling,
            statless,
        }
    }

    /// A player with no history at all; the outcome model substitutes
    /// neutral floor values for them.
    pub fn unknown(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_records(id, name, BattingRecord::default(), BowlingRecord::default())
    }
}

fn is_statless(batting: &BattingRecord, bowling: &BowlingRecord) -> bool {
    batting.strike_rate.is_none()
        && batting.average.is_none()
        && batting.runs == 0.0
        && batting.balls_faced == 0.0
        && batting.fours == 0
        && batting.sixes == 0
        && bowling.economy.is_none()
        && bowling.average.is_none()
        && bowling.wickets == 0
        && bowling.overs_bowled == 0.0
        && bowling.runs_conceded == 0.0
}

/// One raw squad-file row. Stat fields tolerate numbers, starred strings and
/// nulls; `player_id` may be an integer or a string.
#[derive(Debug, Deserialize)]
struct RawRow {
    player_id: Option<Value>,
    #[serde(default)]
    player_name: String,
    #[serde(default, deserialize_with = "stat_opt")]
    strike_rate: Option<f64>,
    #[serde(default, deserialize_with = "stat_opt")]
    bat_avg: Option<f64>,
    #[serde(default, deserialize_with = "stat_num")]
    runs: f64,
    #[serde(default, deserialize_with = "stat_num")]
    balls_faced: f64,
    #[serde(default, alias = "4s", deserialize_with = "stat_num")]
    fours: f64,
    #[serde(default, alias = "6s", deserialize_with = "stat_num")]
    sixes: f64,
    #[serde(default, deserialize_with = "stat_opt")]
    bowl_avg: Option<f64>,
    #[serde(default, deserialize_with = "stat_num")]
    wickets: f64,
    #[serde(default, deserialize_with = "stat_num")]
    overs_bowled: f64,
    #[serde(default, deserialize_with = "stat_num")]
    runs_conceded: f64,
    #[serde(default, deserialize_with = "stat_opt")]
    economy: Option<f64>,
}

fn stat_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_stat))
}

fn stat_num<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_stat).unwrap_or(0.0))
}

/// Parse a stat cell, stripping the not-out star scorers leave on run tallies.
fn parse_stat(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.trim().replace('*', "");
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse().ok()
            }
        }
        _ => None,
    }
}

/// Canonical id for a squad row: integer ids become `LMS_0001`-style strings,
/// string ids pass through.
fn canonical_id(raw: &Value) -> Option<String> {
    match raw {
        Value::Number(n) => n.as_u64().map(|n| format!("LMS_{:04}", n)),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn trailing_digits(id: &str) -> Option<&str> {
    let start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(&id[start..])
}

/// Immutable player index built once at load time. Lookup accepts full ids
/// and short forms (`"1"` or `"0001"` for `LMS_0001`).
#[derive(Clone, Debug, Default)]
pub struct PlayerBook {
    players: HashMap<String, Player>,
    short_index: HashMap<String, String>,
    order: Vec<String>,
}

impl PlayerBook {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("loading players from {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read squad file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("failed to parse squad file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let rows: Vec<RawRow> = serde_json::from_str(text).context("squad json is malformed")?;
        Ok(Self::from_rows(rows))
    }

    fn from_rows(rows: Vec<RawRow>) -> Self {
        let mut book = Self::default();
        for row in rows {
            let Some(id) = row.player_id.as_ref().and_then(canonical_id) else {
                continue;
            };
            let batting = BattingRecord {
                strike_rate: row.strike_rate,
                average: row.bat_avg,
                runs: row.runs,
                balls_faced: row.balls_faced,
                fours: row.fours.max(0.0) as u32,
                sixes: row.sixes.max(0.0) as u32,
            };
            let bowling = BowlingRecord {
                economy: row.economy,
                average: row.bowl_avg,
                wickets: row.wickets.max(0.0) as u32,
                overs_bowled: row.overs_bowled,
                runs_conceded: row.runs_conceded,
            };
            let player = Player::from_records(id.clone(), row.player_name, batting, bowling);
            if book.players.insert(id.clone(), player).is_none() {
                book.order.push(id.clone());
            }
            if let Some(digits) = trailing_digits(&id) {
                book.short_index.insert(digits.to_string(), id.clone());
                if let Ok(bare) = digits.parse::<u64>() {
                    book.short_index.insert(bare.to_string(), id.clone());
                }
            }
            book.short_index.insert(id.clone(), id);
        }
        book
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Resolve a full or short id.
    pub fn lookup(&self, id: &str) -> Option<&Player> {
        self.short_index.get(id).and_then(|full| self.players.get(full))
    }

    /// Players in squad-file order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.order.iter().filter_map(|id| self.players.get(id))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct TeamFile {
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    captain_id: Option<String>,
    #[serde(default)]
    keeper_id: Option<String>,
    #[serde(default)]
    team: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    player_id: String,
}

/// A named batting-order roster with optional captain and keeper.
#[derive(Clone, Debug, Serialize)]
pub struct TeamSheet {
    pub name: String,
    pub players: Vec<Player>,
    pub captain_id: Option<String>,
    pub keeper_id: Option<String>,
}

impl TeamSheet {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            players,
            captain_id: None,
            keeper_id: None,
        }
    }

    pub fn with_keeper(mut self, keeper_id: impl Into<String>) -> Self {
        self.keeper_id = Some(keeper_id.into());
        self
    }

    pub fn from_file(path: impl AsRef<Path>, book: &PlayerBook) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read team file {}", path.display()))?;
        Self::from_json_str(&text, book)
            .with_context(|| format!("failed to load team from {}", path.display()))
    }

    pub fn from_json_str(text: &str, book: &PlayerBook) -> Result<Self> {
        let file: TeamFile = serde_json::from_str(text).context("team json is malformed")?;
        if file.team.is_empty() {
            return Err(anyhow!("team file lists no players"));
        }
        let mut players = Vec::with_capacity(file.team.len());
        for entry in &file.team {
            match book.lookup(&entry.player_id) {
                Some(player) => players.push(player.clone()),
                None => warn!("team references unknown player id '{}'", entry.player_id),
            }
        }
        if players.is_empty() {
            return Err(anyhow!("no listed player ids resolve against the squad"));
        }
        // canonicalize role ids so they compare directly against roster ids
        let resolve_role = |role: &str, id: &Option<String>| -> Option<String> {
            let id = id.as_deref()?;
            match book.lookup(id) {
                Some(player) => Some(player.id.clone()),
                None => {
                    warn!("{role} id '{id}' does not resolve against the squad");
                    None
                }
            }
        };
        let captain_id = resolve_role("captain", &file.captain_id);
        let keeper_id = resolve_role("keeper", &file.keeper_id);
        Ok(Self {
            name: file.team_name,
            players,
            captain_id,
            keeper_id,
        })
    }
}
