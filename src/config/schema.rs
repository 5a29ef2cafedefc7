use serde::{Deserialize, Serialize};

use crate::scoring::{InputOverrides, Preset, ScoringConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scenario values used when neither a preset nor a flag sets a field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<InputOverrides>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{EvAdoption, Factor};

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
defaults:
  temperature: 72
  ev_adoption: medium
scoring:
  weights:
    wind: 0.5
presets:
  - name: office-heat
    description: Midweek afternoon heat
    input:
      temperature: 98
      humidity: 60
      hour: 16
      day_of_week: 3
      wind_speed: 2
      cloud_cover: 5
      ev_adoption: high
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.temperature, Some(72.0));
        assert_eq!(defaults.ev_adoption, Some(EvAdoption::Medium));
        assert_eq!(config.scoring.unwrap().weight(Factor::Wind), 0.5);
        assert_eq!(config.presets.len(), 1);
        assert_eq!(config.presets[0].input.hour, 16);
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_requires_full_input() {
        let yaml = r#"
presets:
  - name: partial
    input:
      temperature: 98
"#;
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
