//! The innings simulation: bowler rotation, per-ball outcome model,
//! dismissals and the ball-by-ball state machine.

pub mod bowling;
pub mod dismissal;
pub mod innings;
pub mod outcome;
pub mod scorecard;

pub use bowling::select_bowlers;
pub use dismissal::DismissalKind;
pub use innings::simulate_innings;
pub use scorecard::{BatterCard, BowlerCard, Extras, InningsResult};
