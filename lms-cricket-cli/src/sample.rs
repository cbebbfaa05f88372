//! Embedded demo squad so `demo` works without any files on disk.
//!
//! The rows deliberately mix clean numbers, starred strings and missing
//! fields, the same mess real league exports arrive in.

use anyhow::Result;
use once_cell::sync::Lazy;

use lms_cricket_core::prelude::{PlayerBook, TeamSheet};

const SAMPLE_SQUAD: &str = r#"[
  {"player_id": 1,  "player_name": "Arlo Mensah",    "strike_rate": "142.3", "bat_avg": 31.4, "runs": "612*", "balls_faced": 430, "4s": 58, "6s": 21, "economy": 9.1,  "wickets": 14, "overs_bowled": 42.0, "runs_conceded": 382},
  {"player_id": 2,  "player_name": "Ben Okafor",     "strike_rate": 118.7,   "bat_avg": 27.2, "runs": 488,    "balls_faced": 411, "4s": 41, "6s": 9,  "economy": 7.8,  "wickets": 26, "overs_bowled": 61.0, "runs_conceded": 476},
  {"player_id": 3,  "player_name": "Callum Reid",    "strike_rate": "96.0",  "bat_avg": 19.5, "runs": 302,    "balls_faced": 315, "4s": 22, "6s": 4,  "economy": null, "wickets": 0,  "overs_bowled": 0,    "runs_conceded": 0},
  {"player_id": 4,  "player_name": "Dev Sharma",     "strike_rate": 131.0,   "bat_avg": 24.8, "runs": "540",  "balls_faced": 412, "4s": 47, "6s": 18, "economy": 8.4,  "wickets": 19, "overs_bowled": 50.0, "runs_conceded": 420},
  {"player_id": 5,  "player_name": "Eli Turner",     "strike_rate": "",      "bat_avg": null, "runs": 0,      "balls_faced": 0,   "4s": 0,  "6s": 0,  "economy": null, "wickets": 0,  "overs_bowled": 0,    "runs_conceded": 0},
  {"player_id": 6,  "player_name": "Finn Gallagher", "strike_rate": 104.5,   "bat_avg": 22.0, "runs": 264,    "balls_faced": 253, "4s": 19, "6s": 6,  "economy": 8.9,  "wickets": 11, "overs_bowled": 33.0, "runs_conceded": 294},
  {"player_id": 7,  "player_name": "Gus Whitfield",  "strike_rate": "88.2",  "bat_avg": 15.1, "runs": 181,    "balls_faced": 205, "4s": 12, "6s": 2,  "economy": 7.2,  "wickets": 31, "overs_bowled": 72.0, "runs_conceded": 518},
  {"player_id": 8,  "player_name": "Harry Osei",     "strike_rate": 125.9,   "bat_avg": 20.3, "runs": "345*", "balls_faced": 274, "4s": 30, "6s": 13, "economy": 9.8,  "wickets": 8,  "overs_bowled": 26.0, "runs_conceded": 255},
  {"player_id": 9,  "player_name": "Idris Kane",     "strike_rate": 137.4,   "bat_avg": 29.9, "runs": 571,    "balls_faced": 416, "4s": 52, "6s": 24, "economy": 8.1,  "wickets": 17, "overs_bowled": 47.0, "runs_conceded": 381},
  {"player_id": 10, "player_name": "Jonah Pryce",    "strike_rate": "112.8", "bat_avg": 25.6, "runs": 433,    "balls_faced": 384, "4s": 37, "6s": 10, "economy": 7.5,  "wickets": 23, "overs_bowled": 58.0, "runs_conceded": 435},
  {"player_id": 11, "player_name": "Kofi Adjei",     "strike_rate": 99.1,    "bat_avg": 18.2, "runs": 276,    "balls_faced": 278, "4s": 21, "6s": 5,  "economy": null, "wickets": 0,  "overs_bowled": 0,    "runs_conceded": 0},
  {"player_id": 12, "player_name": "Luka Novak",     "strike_rate": 128.3,   "bat_avg": 23.7, "runs": "498",  "balls_faced": 388, "4s": 44, "6s": 16, "economy": 8.7,  "wickets": 15, "overs_bowled": 41.0, "runs_conceded": 357},
  {"player_id": 13, "player_name": "Moss Hartley",   "strike_rate": null,    "bat_avg": "",   "runs": 0,      "balls_faced": 0,   "4s": 0,  "6s": 0,  "economy": null, "wickets": 0,  "overs_bowled": 0,    "runs_conceded": 0},
  {"player_id": 14, "player_name": "Noah Bakker",    "strike_rate": 108.0,   "bat_avg": 21.9, "runs": 351,    "balls_faced": 325, "4s": 28, "6s": 8,  "economy": 9.3,  "wickets": 12, "overs_bowled": 35.0, "runs_conceded": 326},
  {"player_id": 15, "player_name": "Omar Haddad",    "strike_rate": "92.6",  "bat_avg": 16.8, "runs": 218,    "balls_faced": 235, "4s": 15, "6s": 3,  "economy": 7.0,  "wickets": 28, "overs_bowled": 66.0, "runs_conceded": 462},
  {"player_id": 16, "player_name": "Pete Lindqvist", "strike_rate": 121.5,   "bat_avg": 26.1, "runs": "467*", "balls_faced": 384, "4s": 40, "6s": 14, "economy": 8.2,  "wickets": 20, "overs_bowled": 52.0, "runs_conceded": 427}
]"#;

pub static SAMPLE_BOOK: Lazy<PlayerBook> = Lazy::new(|| {
    // the embedded squad is fixed at compile time; a parse failure here is a
    // programming error, not a runtime condition
    PlayerBook::from_json_str(SAMPLE_SQUAD).unwrap_or_default()
});

/// Split the embedded squad into the two demo sides.
pub fn demo_teams() -> Result<(TeamSheet, TeamSheet)> {
    let players: Vec<_> = SAMPLE_BOOK.players().cloned().collect();
    anyhow::ensure!(players.len() >= 16, "embedded demo squad is incomplete");
    let harriers = TeamSheet::new("Hackney Harriers", players[..8].to_vec())
        .with_keeper(players[2].id.clone());
    let wanderers = TeamSheet::new("Walthamstow Wanderers", players[8..16].to_vec())
        .with_keeper(players[10].id.clone());
    Ok((harriers, wanderers))
}
