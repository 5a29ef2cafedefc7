use super::config::{FactorWeights, ScoringConfig};
use super::factors::Factor;
use super::input::{EvAdoption, StressInput};

/// Check a scenario against the nominal input domains.
///
/// Scoring never rejects input, so these are warnings for the caller.
/// Returns all problems at once (not just the first).
pub fn validate_input(input: &StressInput) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_range(&mut errors, "temperature", input.temperature, -10.0, 120.0);
    check_range(&mut errors, "humidity", input.humidity, 0.0, 100.0);
    check_range(&mut errors, "cloud_cover", input.cloud_cover, 0.0, 100.0);

    if input.hour > 23 {
        errors.push(format!("hour: {} is outside 0-23", input.hour));
    }
    if input.day_of_week > 6 {
        errors.push(format!(
            "day_of_week: {} is outside 0-6 (0 = Sunday)",
            input.day_of_week
        ));
    }
    if !input.wind_speed.is_finite() || input.wind_speed < 0.0 {
        errors.push(format!(
            "wind_speed: {} must be a non-negative number",
            input.wind_speed
        ));
    }
    if input.ev_adoption == EvAdoption::Unrecognized {
        errors.push(
            "ev_adoption: unrecognized level, using neutral multiplier (expected low, medium or high)"
                .to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_range(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() {
        errors.push(format!("{}: must be a finite number", field));
    } else if value < min || value > max {
        errors.push(format!("{}: {} is outside {}-{}", field, value, min, max));
    }
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref weights) = config.weights {
        for factor in Factor::ALL {
            let weight = weights.get(factor);
            if !weight.is_finite() || weight < 0.0 {
                errors.push(format!(
                    "scoring.weights.{}: must be a non-negative number, got {}",
                    FactorWeights::key(factor),
                    weight
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
