//! Match orchestration: toss, two innings, result.

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{MatchConfig, Tuning};
use crate::data::TeamSheet;
use crate::over_log::OverLog;
use crate::sim::{simulate_innings, InningsResult};

/// Outcome of a completed match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum MatchResult {
    WonByRuns { team: String, runs: u32 },
    WonByWickets { team: String, wickets: u32 },
    Tied,
}

impl MatchResult {
    pub fn text(&self) -> String {
        match self {
            Self::WonByRuns { team, runs } => {
                format!("{team} won by {runs} run{}", plural(*runs))
            }
            Self::WonByWickets { team, wickets } => {
                format!("{team} won by {wickets} wicket{}", plural(*wickets))
            }
            Self::Tied => "Match tied".to_string(),
        }
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Everything a caller needs to render or archive one simulated match.
/// Serializes to the export JSON shape directly.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub first_batting: String,
    pub second_batting: String,
    pub first_innings: InningsResult,
    pub second_innings: InningsResult,
    pub first_log: OverLog,
    pub second_log: OverLog,
    /// Runs the chasing side needed: first innings total plus one.
    pub target: u32,
    pub result: MatchResult,
    pub result_text: String,
}

/// Runs whole matches. The engine itself is stateless between calls; every
/// `simulate` builds a fresh `SmallRng` from the given seed, so the same
/// seed and rosters reproduce the same report field for field.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    tuning: Tuning,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            tuning: Tuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Simulate a full match between `team_a` and `team_b`.
    ///
    /// `a_bats_first` overrides the toss; `None` flips a coin on the seeded
    /// stream. The toss draw happens before any innings draw, so overriding
    /// it changes the whole downstream stream for the same seed.
    pub fn simulate(
        &self,
        team_a: &TeamSheet,
        team_b: &TeamSheet,
        seed: u64,
        a_bats_first: Option<bool>,
    ) -> MatchReport {
        let mut rng = SmallRng::seed_from_u64(seed);
        let a_first = a_bats_first.unwrap_or_else(|| rng.gen::<bool>());
        let (first, second) = if a_first {
            (team_a, team_b)
        } else {
            (team_b, team_a)
        };
        info!("seed {seed}: {} bat first against {}", first.name, second.name);

        let mut first_log = OverLog::new();
        let first_innings = simulate_innings(
            &first.players,
            &second.players,
            &self.config,
            &self.tuning,
            None,
            second.keeper_id.as_deref(),
            Some(&mut first_log),
            &mut rng,
        );
        let target = first_innings.runs + 1;

        let mut second_log = OverLog::new();
        let second_innings = simulate_innings(
            &second.players,
            &first.players,
            &self.config,
            &self.tuning,
            Some(target),
            first.keeper_id.as_deref(),
            Some(&mut second_log),
            &mut rng,
        );

        let result = calculate_result(&first.name, &second.name, first_innings.runs, &second_innings);
        info!("seed {seed}: {}", result.text());
        MatchReport {
            seed,
            first_batting: first.name.clone(),
            second_batting: second.name.clone(),
            result_text: result.text(),
            first_innings,
            second_innings,
            first_log,
            second_log,
            target,
            result,
        }
    }
}

/// The chasing side wins by the batters it still has in hand, the defending
/// side by its run cushion; equal totals tie.
fn calculate_result(
    first_name: &str,
    second_name: &str,
    first_runs: u32,
    second: &InningsResult,
) -> MatchResult {
    if second.runs > first_runs {
        let in_hand = (second.batsmen.len() as u32).saturating_sub(second.wickets);
        MatchResult::WonByWickets {
            team: second_name.to_string(),
            wickets: in_hand,
        }
    } else if second.runs == first_runs {
        MatchResult::Tied
    } else {
        MatchResult::WonByRuns {
            team: first_name.to_string(),
            runs: first_runs - second.runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Player;
    use crate::sim::{BatterCard, Extras};

    fn chase(runs: u32, wickets: u32, roster: usize) -> InningsResult {
        let batsmen = (0..roster)
            .map(|i| BatterCard::new(&Player::unknown(format!("P{i}"), format!("P{i}"))))
            .collect();
        InningsResult {
            runs,
            wickets,
            balls: 100,
            batsmen,
            bowlers: Vec::new(),
            extras: Extras::default(),
        }
    }

    #[test]
    fn defending_side_wins_by_runs() {
        let result = calculate_result("Falcons", "Miners", 142, &chase(120, 8, 8));
        assert_eq!(
            result,
            MatchResult::WonByRuns {
                team: "Falcons".to_string(),
                runs: 22,
            }
        );
        assert_eq!(result.text(), "Falcons won by 22 runs");
    }

    #[test]
    fn chasing_side_wins_by_wickets_in_hand() {
        let result = calculate_result("Falcons", "Miners", 142, &chase(143, 5, 8));
        assert_eq!(
            result,
            MatchResult::WonByWickets {
                team: "Miners".to_string(),
                wickets: 3,
            }
        );
        assert_eq!(result.text(), "Miners won by 3 wickets");
    }

    #[test]
    fn equal_totals_tie() {
        let result = calculate_result("Falcons", "Miners", 142, &chase(142, 7, 8));
        assert_eq!(result, MatchResult::Tied);
        assert_eq!(result.text(), "Match tied");
    }

    #[test]
    fn singular_margins_read_naturally() {
        assert_eq!(
            calculate_result("A", "B", 100, &chase(99, 8, 8)).text(),
            "A won by 1 run"
        );
        assert_eq!(
            calculate_result("A", "B", 100, &chase(101, 7, 8)).text(),
            "B won by 1 wicket"
        );
    }
}
