pub mod bias;
pub mod calibration;
pub mod duel;
pub mod expected;
pub mod main_weapon;
pub mod trajectory;
pub mod types;

pub use bias::{BiasReport, BiasScorer};
pub use calibration::{CalibrationOutcome, CalibrationSearch, SearchState, calibrate};
pub use duel::{DuelContext, duel_tally, rating_gain};
pub use expected::expected_score;
pub use main_weapon::{MainWeaponIndex, MatchWeapons, UNKNOWN_WEAPON, main_weapon};
pub use trajectory::{RatingTrajectory, WeaponTrajectory, build_trajectory};
pub use types::{DuelTally, RatingTable, RatingValue};
