use serde::{Deserialize, Serialize};

use super::factors::Factor;

/// Scoring configuration.
///
/// Each of the six sub-scores can be scaled independently. Weights apply to
/// the bounded sub-score before summation; all weights default to 1.0, which
/// reproduces the unweighted index exactly.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     wind: 0.5
///     ev_charging: 1.5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: Option<FactorWeights>,
}

impl ScoringConfig {
    pub fn weight(&self, factor: Factor) -> f64 {
        self.weights
            .as_ref()
            .map(|w| w.get(factor))
            .unwrap_or(1.0)
    }
}

/// Per-factor multipliers. Missing entries mean 1.0.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FactorWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ev_charging: Option<f64>,
}

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        let weight = match factor {
            Factor::Temperature => self.temperature,
            Factor::TimeOfDay => self.time_of_day,
            Factor::DayOfWeek => self.day_of_week,
            Factor::Wind => self.wind,
            Factor::Solar => self.solar,
            Factor::EvCharging => self.ev_charging,
        };
        weight.unwrap_or(1.0)
    }

    /// Config key for a factor, as it appears in YAML and error messages.
    pub fn key(factor: Factor) -> &'static str {
        match factor {
            Factor::Temperature => "temperature",
            Factor::TimeOfDay => "time_of_day",
            Factor::DayOfWeek => "day_of_week",
            Factor::Wind => "wind",
            Factor::Solar => "solar",
            Factor::EvCharging => "ev_charging",
        }
    }
}
