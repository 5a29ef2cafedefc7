use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of vehicles that are electric in the modelled service area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvAdoption {
    Low,
    Medium,
    High,
    /// Any label we don't know. Scores with a neutral multiplier.
    #[serde(other)]
    Unrecognized,
}

impl EvAdoption {
    /// Multiplier applied to the EV charging base pressure.
    pub fn multiplier(self) -> f64 {
        match self {
            EvAdoption::Low => 0.4,
            EvAdoption::Medium => 1.0,
            EvAdoption::High => 2.2,
            EvAdoption::Unrecognized => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvAdoption::Low => "low",
            EvAdoption::Medium => "medium",
            EvAdoption::High => "high",
            EvAdoption::Unrecognized => "unrecognized",
        }
    }

    /// Step to the next level, wrapping around. Used by the TUI slider.
    pub fn next(self) -> Self {
        match self {
            EvAdoption::Low => EvAdoption::Medium,
            EvAdoption::Medium => EvAdoption::High,
            EvAdoption::High | EvAdoption::Unrecognized => EvAdoption::Low,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            EvAdoption::Low | EvAdoption::Unrecognized => EvAdoption::High,
            EvAdoption::Medium => EvAdoption::Low,
            EvAdoption::High => EvAdoption::Medium,
        }
    }
}

impl FromStr for EvAdoption {
    type Err = std::convert::Infallible;

    /// Never fails: unknown labels map to `Unrecognized`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "low" => EvAdoption::Low,
            "medium" | "med" => EvAdoption::Medium,
            "high" => EvAdoption::High,
            _ => EvAdoption::Unrecognized,
        })
    }
}

impl fmt::Display for EvAdoption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather and calendar snapshot that drives the stress score.
///
/// Values outside their nominal ranges are accepted; every sub-score holds
/// flat at its nearest breakpoint instead of extrapolating.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StressInput {
    /// Air temperature in °F (nominal -10..=120)
    pub temperature: f64,
    /// Relative humidity in percent (nominal 0..=100)
    pub humidity: f64,
    /// Hour of day (nominal 0..=23)
    pub hour: u32,
    /// Day of week, 0 = Sunday (nominal 0..=6)
    pub day_of_week: u32,
    /// Wind speed in mph
    pub wind_speed: f64,
    /// Cloud cover in percent (nominal 0..=100)
    pub cloud_cover: f64,
    pub ev_adoption: EvAdoption,
}

impl Default for StressInput {
    fn default() -> Self {
        Self {
            temperature: 72.0,
            humidity: 50.0,
            hour: 12,
            day_of_week: 3,
            wind_speed: 5.0,
            cloud_cover: 30.0,
            ev_adoption: EvAdoption::Medium,
        }
    }
}

impl StressInput {
    /// Copy of this input with only the hour replaced.
    pub fn at_hour(&self, hour: u32) -> Self {
        Self { hour, ..*self }
    }
}

/// A partial `StressInput`. Used for config defaults and layered CLI input;
/// any field left as `None` keeps the value underneath it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ev_adoption: Option<EvAdoption>,
}

impl InputOverrides {
    pub fn apply_to(&self, base: &mut StressInput) {
        if let Some(v) = self.temperature {
            base.temperature = v;
        }
        if let Some(v) = self.humidity {
            base.humidity = v;
        }
        if let Some(v) = self.hour {
            base.hour = v;
        }
        if let Some(v) = self.day_of_week {
            base.day_of_week = v;
        }
        if let Some(v) = self.wind_speed {
            base.wind_speed = v;
        }
        if let Some(v) = self.cloud_cover {
            base.cloud_cover = v;
        }
        if let Some(v) = self.ev_adoption {
            base.ev_adoption = v;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == InputOverrides::default()
    }
}

impl From<StressInput> for InputOverrides {
    fn from(input: StressInput) -> Self {
        Self {
            temperature: Some(input.temperature),
            humidity: Some(input.humidity),
            hour: Some(input.hour),
            day_of_week: Some(input.day_of_week),
            wind_speed: Some(input.wind_speed),
            cloud_cover: Some(input.cloud_cover),
            ev_adoption: Some(input.ev_adoption),
        }
    }
}
