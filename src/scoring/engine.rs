use serde::Serialize;

use super::config::ScoringConfig;
use super::factors::Factor;
use super::input::StressInput;
use super::level::StressLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub value: f64,  // Bounded sub-score before weighting
    pub weight: f64, // 1.0 unless configured
}

impl FactorContribution {
    pub fn weighted(&self) -> f64 {
        self.value * self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    pub raw_total: f64, // Weighted sum before rounding and clamping
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub level: StressLevel,
    pub breakdown: ScoreBreakdown,
}

pub fn calculate_score(input: &StressInput, config: &ScoringConfig) -> ScoreResult {
    let factors: Vec<FactorContribution> = Factor::ALL
        .iter()
        .map(|&factor| FactorContribution {
            factor,
            value: factor.evaluate(input),
            weight: config.weight(factor),
        })
        .collect();

    let raw_total: f64 = factors.iter().map(FactorContribution::weighted).sum();
    let score = finalize(raw_total);

    ScoreResult {
        score,
        level: StressLevel::from_score(score),
        breakdown: ScoreBreakdown { factors, raw_total },
    }
}

/// Stress index for `input` with the default (unweighted) model.
pub fn calculate_stress_score(input: &StressInput) -> u8 {
    let raw_total: f64 = Factor::ALL.iter().map(|f| f.evaluate(input)).sum();
    finalize(raw_total)
}

/// Round to the nearest integer, then clamp into 0..=100.
fn finalize(raw_total: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    raw_total.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{EvAdoption, FactorWeights};
    use pretty_assertions::assert_eq;

    fn heatwave() -> StressInput {
        StressInput {
            temperature: 102.0,
            humidity: 45.0,
            hour: 17,
            day_of_week: 2,
            wind_speed: 3.0,
            cloud_cover: 10.0,
            ev_adoption: EvAdoption::High,
        }
    }

    fn spring_night() -> StressInput {
        StressInput {
            temperature: 65.0,
            humidity: 50.0,
            hour: 3,
            day_of_week: 0,
            wind_speed: 10.0,
            cloud_cover: 50.0,
            ev_adoption: EvAdoption::Low,
        }
    }

    fn winter_freeze() -> StressInput {
        StressInput {
            temperature: 10.0,
            humidity: 60.0,
            hour: 7,
            day_of_week: 1,
            wind_speed: 5.0,
            cloud_cover: 80.0,
            ev_adoption: EvAdoption::Medium,
        }
    }

    #[test]
    fn test_heatwave_is_critical() {
        let score = calculate_stress_score(&heatwave());
        // 28.85 + 30 + 8 + 0 + 0.432 + 15
        assert_eq!(score, 82);
        assert_eq!(StressLevel::from_score(score), StressLevel::Critical);
    }

    #[test]
    fn test_spring_night_is_low() {
        let score = calculate_stress_score(&spring_night());
        assert_eq!(score, 4);
        assert_eq!(StressLevel::from_score(score), StressLevel::Low);
    }

    #[test]
    fn test_winter_freeze_is_moderate_to_high() {
        let score = calculate_stress_score(&winter_freeze());
        // 30 + 10 + 8 + 0 + 0 + 3 * 1.36 * 1.15
        assert_eq!(score, 53);
        assert!((30..80).contains(&score));
    }

    #[test]
    fn test_breakdown_lists_all_factors_in_order() {
        let result = calculate_score(&heatwave(), &ScoringConfig::default());
        let factors: Vec<Factor> = result.breakdown.factors.iter().map(|c| c.factor).collect();
        assert_eq!(factors, Factor::ALL.to_vec());
        assert_eq!(result.score, 82);
        assert_eq!(result.level, StressLevel::Critical);
    }

    #[test]
    fn test_breakdown_sum_matches_raw_total() {
        let result = calculate_score(&winter_freeze(), &ScoringConfig::default());
        let sum: f64 = result.breakdown.factors.iter().map(|c| c.value).sum();
        assert!((sum - result.breakdown.raw_total).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_matches_plain_score() {
        for input in [heatwave(), spring_night(), winter_freeze()] {
            let result = calculate_score(&input, &ScoringConfig::default());
            assert_eq!(result.score, calculate_stress_score(&input));
        }
    }

    #[test]
    fn test_weights_scale_sub_scores() {
        let config = ScoringConfig {
            weights: Some(FactorWeights {
                ev_charging: Some(0.0),
                ..Default::default()
            }),
        };
        let result = calculate_score(&heatwave(), &config);
        // Drops the 15 point EV term: 67.28
        assert_eq!(result.score, 67);
        assert_eq!(result.level, StressLevel::High);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let input = StressInput {
            temperature: 60.0,
            hour: 3,
            day_of_week: 0,
            wind_speed: 40.0,
            ..spring_night()
        };
        // 2.71 + 2.25 + 2 - 10 is negative
        assert_eq!(calculate_stress_score(&input), 0);
    }

    #[test]
    fn test_score_capped_at_hundred() {
        let config = ScoringConfig {
            weights: Some(FactorWeights {
                temperature: Some(5.0),
                ..Default::default()
            }),
        };
        let result = calculate_score(&heatwave(), &config);
        assert_eq!(result.score, 100);
        assert!(result.breakdown.raw_total > 100.0);
    }

    #[test]
    fn test_nan_temperature_scores_zero() {
        let input = StressInput {
            temperature: f64::NAN,
            ..spring_night()
        };
        assert_eq!(calculate_stress_score(&input), 0);
    }
}
