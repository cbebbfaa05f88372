//! Append-only narrative log: one record per delivery plus per-over summaries.
//!
//! The simulator writes into an [`OverLog`] handed in by the caller and never
//! reads it back; presentation is entirely the caller's concern.

use serde::Serialize;
use serde_json::json;

/// One delivery (legal or not), or a retirement notice.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BallEvent {
    /// Over.ball label, e.g. "3.4" for the fourth ball of the fourth over.
    pub ball: String,
    pub bowler: String,
    pub batter: String,
    pub outcome: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FallOfWicket {
    pub label: String,
    pub batter: String,
    pub runs: u32,
    pub balls: u32,
    pub howout: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverSummary {
    /// 1-based over number.
    pub over: u32,
    /// "" for a completed over, "partial" when the innings ended mid-over,
    /// "end" when the side was bowled out.
    pub label: String,
    /// Cumulative score, "runs/wickets".
    pub score: String,
    pub over_runs: u32,
    pub over_wickets: u32,
    /// Bowler figures line, "Name O.B-M-R-W".
    pub bowler_line: String,
    /// Current batters, "Name runs* (balls)".
    pub batters: Vec<String>,
    pub fow: Vec<FallOfWicket>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OverLog {
    balls: Vec<BallEvent>,
    overs: Vec<OverSummary>,
}

impl OverLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ball(
        &mut self,
        ball: impl Into<String>,
        bowler: &str,
        batter: &str,
        outcome: impl Into<String>,
    ) {
        self.balls.push(BallEvent {
            ball: ball.into(),
            bowler: bowler.to_string(),
            batter: batter.to_string(),
            outcome: outcome.into(),
        });
    }

    pub fn push_over(&mut self, summary: OverSummary) {
        self.overs.push(summary);
    }

    pub fn ball_events(&self) -> &[BallEvent] {
        &self.balls
    }

    pub fn over_summaries(&self) -> &[OverSummary] {
        &self.overs
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "balls": self.balls,
            "overs": self.overs,
        })
    }
}
