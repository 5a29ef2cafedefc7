use serde::{Deserialize, Serialize};

use super::input::{EvAdoption, StressInput};

/// A named scenario.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input: StressInput,
}

/// Scenarios that ship with the tool.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "heatwave".to_string(),
            description: Some("Hot, still weekday evening with high EV adoption".to_string()),
            input: StressInput {
                temperature: 102.0,
                humidity: 45.0,
                hour: 17,
                day_of_week: 2,
                wind_speed: 3.0,
                cloud_cover: 10.0,
                ev_adoption: EvAdoption::High,
            },
        },
        Preset {
            name: "spring-night".to_string(),
            description: Some("Mild Sunday in the small hours".to_string()),
            input: StressInput {
                temperature: 65.0,
                humidity: 50.0,
                hour: 3,
                day_of_week: 0,
                wind_speed: 10.0,
                cloud_cover: 50.0,
                ev_adoption: EvAdoption::Low,
            },
        },
        Preset {
            name: "winter-freeze".to_string(),
            description: Some("Monday morning freeze with preconditioning load".to_string()),
            input: StressInput {
                temperature: 10.0,
                humidity: 60.0,
                hour: 7,
                day_of_week: 1,
                wind_speed: 5.0,
                cloud_cover: 80.0,
                ev_adoption: EvAdoption::Medium,
            },
        },
        Preset {
            name: "polar-vortex".to_string(),
            description: Some("Deep cold Monday evening, gusty, high EV adoption".to_string()),
            input: StressInput {
                temperature: -10.0,
                humidity: 70.0,
                hour: 18,
                day_of_week: 1,
                wind_speed: 30.0,
                cloud_cover: 90.0,
                ev_adoption: EvAdoption::High,
            },
        },
    ]
}

/// Built-ins merged with user presets. A user preset replaces a built-in of
/// the same name (case-insensitive) in place; new names are appended.
pub fn merged_presets(user: &[Preset]) -> Vec<Preset> {
    let mut presets = builtin_presets();
    for preset in user {
        match presets
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&preset.name))
        {
            Some(existing) => *existing = preset.clone(),
            None => presets.push(preset.clone()),
        }
    }
    presets
}

/// Case-insensitive lookup.
pub fn find_preset<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    let name = name.trim();
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
