//! Match formats and simulation tuning parameters.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Supported match formats. Unknown format names are rejected once at
/// construction time; nothing inside the per-ball loop can fail on format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchType {
    /// Last Man Standing: 20 five-ball overs, 8 a side, batters retire at 50
    /// and rejoin the queue, the final batter bats alone.
    LastManStanding,
    T20,
    OneDay,
    /// No ball limit; the innings runs until the side is all out.
    FirstClass,
}

impl MatchType {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LMS" => Ok(Self::LastManStanding),
            "T20" => Ok(Self::T20),
            "OD" | "ODI" => Ok(Self::OneDay),
            "FIRST_CLASS" | "FC" => Ok(Self::FirstClass),
            other => bail!("unknown match type '{}'", other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LastManStanding => "LMS",
            Self::T20 => "T20",
            Self::OneDay => "OD",
            Self::FirstClass => "FIRST_CLASS",
        }
    }
}

/// Immutable format descriptor shared by both innings of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    pub match_type: MatchType,
    pub balls_per_over: u32,
    /// `None` means no ball limit (first-class).
    pub balls_per_innings: Option<u32>,
    pub team_size: usize,
    /// Run threshold at which a batter retires (LMS house rule).
    pub retirement_threshold: Option<u32>,
}

impl MatchConfig {
    pub fn new(match_type: MatchType) -> Self {
        match match_type {
            MatchType::LastManStanding => Self {
                match_type,
                balls_per_over: 5,
                balls_per_innings: Some(100),
                team_size: 8,
                retirement_threshold: Some(50),
            },
            MatchType::T20 => Self {
                match_type,
                balls_per_over: 6,
                balls_per_innings: Some(120),
                team_size: 11,
                retirement_threshold: None,
            },
            MatchType::OneDay => Self {
                match_type,
                balls_per_over: 6,
                balls_per_innings: Some(300),
                team_size: 11,
                retirement_threshold: None,
            },
            MatchType::FirstClass => Self {
                match_type,
                balls_per_over: 6,
                balls_per_innings: None,
                team_size: 11,
                retirement_threshold: None,
            },
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(MatchType::from_name(name)?))
    }

    pub fn lms() -> Self {
        Self::new(MatchType::LastManStanding)
    }

    /// Convert a ball count to the usual overs notation, e.g. 7 balls with
    /// 5-ball overs -> "1.2".
    pub fn overs_from_balls(&self, balls: u32) -> String {
        format!("{}.{}", balls / self.balls_per_over, balls % self.balls_per_over)
    }

    /// Index of the last over of the innings, if the format has a ball limit.
    pub fn final_over(&self) -> Option<u32> {
        self.balls_per_innings.map(|limit| {
            let full = limit / self.balls_per_over;
            if limit % self.balls_per_over == 0 && full > 0 {
                full - 1
            } else {
                full
            }
        })
    }
}

/// Hand-tuned probability constants for the outcome model.
///
/// None of these are derived from a principled cricket model; they were tuned
/// over batch runs until simulated scorecards tracked historical averages.
/// They are plain data so callers can recalibrate without touching the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tuning {
    /// Baseline per-ball wicket probability before skill adjustments.
    pub wicket_base: f64,
    /// Weight of the bowler's normalized wicket-rate score.
    pub wicket_bowl_weight: f64,
    /// Weight of the batter's normalized strike-rate score.
    pub wicket_bat_weight: f64,
    pub wicket_floor: f64,
    pub wicket_ceiling: f64,
    /// Wicket-rate (wickets per ball) at which a bowler's skill score caps at 1.
    pub max_wicket_rate: f64,
    /// Strike rate at which a batter's skill score caps at 1.
    pub max_strike_rate: f64,
    /// Minimum per-ball boundary probabilities, so statless batters still hit out.
    pub four_floor: f64,
    pub six_floor: f64,
    /// Multipliers on the batter's historical boundary rates.
    pub four_scale: f64,
    pub six_scale: f64,
    /// Split of the non-boundary mass across 0/1/2/3 runs.
    pub base_split: [f64; 4],
    /// Batting advantage above this shifts mass toward boundaries.
    pub advantage_threshold: f64,
    pub advantage_four_boost: f64,
    pub advantage_six_boost: f64,
    /// Per-delivery chance of a wide or no-ball, independent of skill.
    pub penalty_ball_prob: f64,
    /// Share of penalty balls that are wides (remainder are no-balls).
    pub wide_share: f64,
    /// Per-over uniform jitter applied to the bowler's runs-per-ball estimate.
    pub economy_leakage: f64,
    /// Economy growth per over already bowled by the same bowler.
    pub fatigue_per_over: f64,
    /// In last-man mode, share of the odd-run mass remapped to the dot ball
    /// (remainder goes to the two).
    pub last_man_dot_share: f64,
    /// Chance a run-out falls on the non-striker.
    pub run_out_non_striker: f64,
    /// Weights for Bowled, Caught, Caught-and-Bowled, Run-Out, Stumped, LBW.
    pub dismissal_weights: [f64; 6],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wicket_base: 0.035,
            wicket_bowl_weight: 0.06,
            wicket_bat_weight: 0.03,
            wicket_floor: 0.01,
            wicket_ceiling: 0.12,
            max_wicket_rate: 0.2,
            max_strike_rate: 200.0,
            four_floor: 0.05,
            six_floor: 0.02,
            four_scale: 1.2,
            six_scale: 1.0,
            base_split: [0.45, 0.35, 0.12, 0.08],
            advantage_threshold: 0.5,
            advantage_four_boost: 0.20,
            advantage_six_boost: 0.12,
            penalty_ball_prob: 0.025,
            wide_share: 0.6,
            economy_leakage: 0.10,
            fatigue_per_over: 0.02,
            last_man_dot_share: 0.6,
            run_out_non_striker: 0.3,
            dismissal_weights: [0.32, 0.34, 0.05, 0.08, 0.09, 0.12],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lms_format_parameters() {
        let config = MatchConfig::lms();
        assert_eq!(config.balls_per_over, 5);
        assert_eq!(config.balls_per_innings, Some(100));
        assert_eq!(config.team_size, 8);
        assert_eq!(config.retirement_threshold, Some(50));
        assert_eq!(config.final_over(), Some(19));
    }

    #[test]
    fn unknown_match_type_is_a_construction_error() {
        assert!(MatchType::from_name("THE_HUNDRED").is_err());
        assert!(MatchType::from_name("lms").is_ok());
    }

    #[test]
    fn first_class_has_no_ball_limit() {
        let config = MatchConfig::new(MatchType::FirstClass);
        assert_eq!(config.balls_per_innings, None);
        assert_eq!(config.final_over(), None);
    }

    #[test]
    fn overs_notation() {
        let config = MatchConfig::lms();
        assert_eq!(config.overs_from_balls(0), "0.0");
        assert_eq!(config.overs_from_balls(7), "1.2");
        assert_eq!(config.overs_from_balls(100), "20.0");
    }
}
