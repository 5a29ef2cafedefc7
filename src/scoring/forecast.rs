use super::config::ScoringConfig;
use super::engine::{calculate_score, calculate_stress_score};
use super::input::StressInput;

pub const HOURS_PER_DAY: usize = 24;

/// Hourly stress profile: index `i` is the score at hour `i` with every other
/// field of `input` held.
pub fn generate_24_hour_forecast(input: &StressInput) -> [u8; HOURS_PER_DAY] {
    std::array::from_fn(|hour| calculate_stress_score(&input.at_hour(hour as u32)))
}

/// Same as [`generate_24_hour_forecast`] but honouring factor weights.
pub fn generate_weighted_forecast(input: &StressInput, config: &ScoringConfig) -> [u8; HOURS_PER_DAY] {
    std::array::from_fn(|hour| calculate_score(&input.at_hour(hour as u32), config).score)
}

/// Hour and score of the highest point. Ties resolve to the earliest hour.
pub fn forecast_peak(forecast: &[u8]) -> Option<(usize, u8)> {
    forecast
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (hour, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((hour, score)),
        })
}
