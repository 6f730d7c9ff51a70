/// Rating difference at which the stronger side is ten times as likely to win
const ELO_SCALE: f64 = 400.0;

/// Probability that a player rated `rating` wins a duel against `opponent_rating`.
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent_rating - rating) / ELO_SCALE))
}
