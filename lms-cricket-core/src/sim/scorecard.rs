//! Per-innings scorecard records returned to the caller.

use serde::Serialize;

use crate::data::Player;

/// One batting-side player's innings. Never mutated again once dismissed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatterCard {
    pub id: String,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub dismissed: bool,
    /// Dismissal text, e.g. "c Jones b Smith"; empty while not out.
    pub howout: String,
    /// Currently off the field after retiring (may return).
    pub retired: bool,
    /// Latched on first retirement; a batter never retires twice.
    pub has_retired: bool,
}

impl BatterCard {
    pub(crate) fn new(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            runs: 0,
            balls: 0,
            dismissed: false,
            howout: String::new(),
            retired: false,
            has_retired: false,
        }
    }

    pub fn is_not_out(&self) -> bool {
        !self.dismissed
    }
}

/// One selected bowler's innings figures. `balls` counts legal deliveries only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BowlerCard {
    pub id: String,
    pub name: String,
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    pub maidens: u32,
}

impl BowlerCard {
    pub(crate) fn new(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            balls: 0,
            runs: 0,
            wickets: 0,
            maidens: 0,
        }
    }

    /// Figures in O.B-M-R-W form.
    pub fn figures(&self, balls_per_over: u32) -> String {
        format!(
            "{}.{}-{}-{}-{}",
            self.balls / balls_per_over,
            self.balls % balls_per_over,
            self.maidens,
            self.runs,
            self.wickets
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub penalty: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.penalty
    }
}

/// Terminal result of one simulated innings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InningsResult {
    pub runs: u32,
    pub wickets: u32,
    /// Legal deliveries bowled.
    pub balls: u32,
    /// Batting order, one card per roster member.
    pub batsmen: Vec<BatterCard>,
    /// Rotation order, selected bowlers only.
    pub bowlers: Vec<BowlerCard>,
    pub extras: Extras,
}

impl InningsResult {
    /// Runs credited to batters (total minus extras).
    pub fn batter_runs(&self) -> u32 {
        self.batsmen.iter().map(|b| b.runs).sum()
    }
}
