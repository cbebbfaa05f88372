//! Ball-by-ball cricket simulation for the "Last Man Standing" house format:
//! 5-ball overs, 8-a-side, retirement at 50, last batter carries on alone.
//!
//! The main entry point for full matches is [`engine::MatchEngine`]; single
//! innings are simulated with [`sim::simulate_innings`].

pub mod config;
pub mod data;
pub mod engine;
pub mod over_log;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::config::{MatchConfig, MatchType, Tuning};
    pub use crate::data::{Player, PlayerBook, TeamSheet};
    pub use crate::engine::{MatchEngine, MatchReport, MatchResult};
    pub use crate::over_log::OverLog;
    pub use crate::sim::{select_bowlers, simulate_innings, InningsResult};
}
