pub mod competitive;
pub mod deathmatch;
pub mod running_average;

pub use competitive::{CompetitiveGame, LobbyEstimate, competitive_games};
pub use deathmatch::{DeathmatchGame, deathmatch_games};
pub use running_average::RunningAverage;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
