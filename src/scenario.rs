use anyhow::Result;
use chrono::{Datelike, Timelike};
use std::fmt;
use tracing::debug;

use crate::config::Config;
use crate::scoring::{find_preset, merged_presets, InputOverrides, Preset, StressInput};

/// `--preset` named a scenario that neither the built-ins nor the config define.
#[derive(Debug)]
pub struct UnknownPresetError {
    pub name: String,
    pub available: Vec<String>,
}

impl fmt::Display for UnknownPresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown preset '{}'. Available: {}",
            self.name,
            self.available.join(", ")
        )
    }
}

impl std::error::Error for UnknownPresetError {}

/// Where each layer of the scenario comes from.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRequest {
    pub preset: Option<String>,
    pub flags: InputOverrides,
    /// Scenario saved by the TUI, used only when no preset or flag is given
    pub saved: Option<StressInput>,
}

/// Hour and day of week of `now`, Sunday = 0.
pub fn clock_fields<T: Datelike + Timelike>(now: &T) -> (u32, u32) {
    (now.hour(), now.weekday().num_days_from_sunday())
}

/// All presets visible with this config, built-ins first.
pub fn available_presets(config: &Config) -> Vec<Preset> {
    merged_presets(&config.presets)
}

/// Layer the scenario: built-in defaults, config defaults, saved scenario,
/// preset, flags. Hour and day fall back to `clock` when no layer sets them.
pub fn resolve_input(config: &Config, request: &ScenarioRequest, clock: (u32, u32)) -> Result<StressInput> {
    let mut input = StressInput::default();
    let mut hour_set = false;
    let mut day_set = false;

    let mut apply = |layer: &InputOverrides, input: &mut StressInput| {
        hour_set |= layer.hour.is_some();
        day_set |= layer.day_of_week.is_some();
        layer.apply_to(input);
    };

    if let Some(defaults) = &config.defaults {
        apply(defaults, &mut input);
    }

    let explicit = request.preset.is_some() || !request.flags.is_empty();
    if let (Some(saved), false) = (request.saved, explicit) {
        debug!("Using saved scenario");
        apply(&InputOverrides::from(saved), &mut input);
    }

    if let Some(name) = &request.preset {
        let presets = available_presets(config);
        let preset = find_preset(&presets, name).ok_or_else(|| UnknownPresetError {
            name: name.clone(),
            available: presets.iter().map(|p| p.name.clone()).collect(),
        })?;
        debug!(preset = %preset.name, "Applying preset");
        apply(&InputOverrides::from(preset.input), &mut input);
    }

    apply(&request.flags, &mut input);

    if !hour_set {
        input.hour = clock.0;
    }
    if !day_set {
        input.day_of_week = clock.1;
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::EvAdoption;
    use chrono::NaiveDate;

    const CLOCK: (u32, u32) = (9, 4);

    #[test]
    fn test_defaults_use_clock() {
        let input = resolve_input(&Config::default(), &ScenarioRequest::default(), CLOCK).unwrap();
        assert_eq!(input.hour, 9);
        assert_eq!(input.day_of_week, 4);
        assert_eq!(input.temperature, StressInput::default().temperature);
    }

    #[test]
    fn test_config_defaults_apply() {
        let config = Config {
            defaults: Some(InputOverrides {
                temperature: Some(40.0),
                hour: Some(20),
                ..Default::default()
            }),
            ..Default::default()
        };
        let input = resolve_input(&config, &ScenarioRequest::default(), CLOCK).unwrap();
        assert_eq!(input.temperature, 40.0);
        assert_eq!(input.hour, 20);
        assert_eq!(input.day_of_week, 4);
    }

    #[test]
    fn test_preset_then_flags() {
        let request = ScenarioRequest {
            preset: Some("heatwave".to_string()),
            flags: InputOverrides {
                wind_speed: Some(30.0),
                ..Default::default()
            },
            saved: None,
        };
        let input = resolve_input(&Config::default(), &request, CLOCK).unwrap();
        assert_eq!(input.temperature, 102.0);
        assert_eq!(input.hour, 17);
        assert_eq!(input.wind_speed, 30.0);
        assert_eq!(input.ev_adoption, EvAdoption::High);
    }

    #[test]
    fn test_unknown_preset() {
        let request = ScenarioRequest {
            preset: Some("monsoon".to_string()),
            ..Default::default()
        };
        let err = resolve_input(&Config::default(), &request, CLOCK).unwrap_err();
        let unknown = err.downcast_ref::<UnknownPresetError>().unwrap();
        assert_eq!(unknown.name, "monsoon");
        assert!(unknown.available.contains(&"heatwave".to_string()));
    }

    #[test]
    fn test_saved_used_without_flags() {
        let saved = StressInput {
            temperature: 12.0,
            hour: 6,
            ..StressInput::default()
        };
        let request = ScenarioRequest {
            saved: Some(saved),
            ..Default::default()
        };
        let input = resolve_input(&Config::default(), &request, CLOCK).unwrap();
        assert_eq!(input, saved);
    }

    #[test]
    fn test_saved_ignored_with_flags() {
        let saved = StressInput {
            temperature: 12.0,
            ..StressInput::default()
        };
        let request = ScenarioRequest {
            saved: Some(saved),
            flags: InputOverrides {
                humidity: Some(80.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let input = resolve_input(&Config::default(), &request, CLOCK).unwrap();
        assert_eq!(input.temperature, StressInput::default().temperature);
        assert_eq!(input.humidity, 80.0);
    }

    #[test]
    fn test_clock_fields_sunday_is_zero() {
        // 2026-10-18 is a Sunday
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(21, 15, 0)
            .unwrap();
        assert_eq!(clock_fields(&now), (21, 0));
    }
}
