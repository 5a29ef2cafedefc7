use crate::scoring::{
    calculate_score, generate_weighted_forecast, EvAdoption, Preset, ScoreResult, ScoringConfig, StressInput,
    HOURS_PER_DAY,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
    Hour,
    DayOfWeek,
    WindSpeed,
    CloudCover,
    EvAdoption,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Temperature,
        Field::Humidity,
        Field::Hour,
        Field::DayOfWeek,
        Field::WindSpeed,
        Field::CloudCover,
        Field::EvAdoption,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::Hour => "Hour",
            Field::DayOfWeek => "Day",
            Field::WindSpeed => "Wind",
            Field::CloudCover => "Cloud cover",
            Field::EvAdoption => "EV adoption",
        }
    }

    /// Slider range (min, max) and step. EV adoption is a 3-stop slider.
    pub fn range(self) -> (f64, f64, f64) {
        match self {
            Field::Temperature => (-10.0, 120.0, 1.0),
            Field::Humidity => (0.0, 100.0, 5.0),
            Field::Hour => (0.0, 23.0, 1.0),
            Field::DayOfWeek => (0.0, 6.0, 1.0),
            Field::WindSpeed => (0.0, 40.0, 1.0),
            Field::CloudCover => (0.0, 100.0, 5.0),
            Field::EvAdoption => (0.0, 2.0, 1.0),
        }
    }

    /// Current slider position of this field in `input`.
    pub fn value(self, input: &StressInput) -> f64 {
        match self {
            Field::Temperature => input.temperature,
            Field::Humidity => input.humidity,
            Field::Hour => input.hour as f64,
            Field::DayOfWeek => input.day_of_week as f64,
            Field::WindSpeed => input.wind_speed,
            Field::CloudCover => input.cloud_cover,
            Field::EvAdoption => match input.ev_adoption {
                EvAdoption::Low => 0.0,
                EvAdoption::Medium | EvAdoption::Unrecognized => 1.0,
                EvAdoption::High => 2.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    ScoreBreakdown,
}

pub struct App {
    pub input: StressInput,
    pub scoring: ScoringConfig,
    pub presets: Vec<Preset>,
    pub preset_index: Option<usize>,
    pub selected: usize,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub state_path: Option<PathBuf>,
}

impl App {
    pub fn new(input: StressInput, scoring: ScoringConfig, presets: Vec<Preset>, state_path: Option<PathBuf>) -> Self {
        Self {
            input,
            scoring,
            presets,
            preset_index: None,
            selected: 0,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            state_path,
        }
    }

    pub fn result(&self) -> ScoreResult {
        calculate_score(&self.input, &self.scoring)
    }

    pub fn forecast(&self) -> [u8; HOURS_PER_DAY] {
        generate_weighted_forecast(&self.input, &self.scoring)
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % Field::ALL.len();
    }

    pub fn previous_field(&mut self) {
        self.selected = if self.selected == 0 {
            Field::ALL.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move the selected slider by `steps` (negative = down). Hour and day
    /// wrap around; continuous fields stop at their range ends.
    pub fn adjust(&mut self, steps: i32) {
        let field = self.selected_field();
        let (min, max, step) = field.range();
        let delta = step * steps as f64;
        match field {
            Field::Temperature => {
                self.input.temperature = (self.input.temperature + delta).clamp(min, max);
            }
            Field::Humidity => {
                self.input.humidity = (self.input.humidity + delta).clamp(min, max);
            }
            Field::WindSpeed => {
                self.input.wind_speed = (self.input.wind_speed + delta).clamp(min, max);
            }
            Field::CloudCover => {
                self.input.cloud_cover = (self.input.cloud_cover + delta).clamp(min, max);
            }
            Field::Hour => {
                self.input.hour = wrap(self.input.hour, steps, 24);
            }
            Field::DayOfWeek => {
                self.input.day_of_week = wrap(self.input.day_of_week, steps, 7);
            }
            Field::EvAdoption => {
                for _ in 0..steps.unsigned_abs() {
                    self.input.ev_adoption = if steps > 0 {
                        self.input.ev_adoption.next()
                    } else {
                        self.input.ev_adoption.previous()
                    };
                }
            }
        }
        self.preset_index = None;
    }

    /// Load the next preset in the list, wrapping to the first.
    pub fn cycle_preset(&mut self) {
        if self.presets.is_empty() {
            self.show_flash("No presets available".to_string());
            return;
        }
        let next = match self.preset_index {
            Some(i) => (i + 1) % self.presets.len(),
            None => 0,
        };
        self.preset_index = Some(next);
        self.input = self.presets[next].input;
        let name = self.presets[next].name.clone();
        self.show_flash(format!("Preset: {}", name));
    }

    pub fn preset_name(&self) -> Option<&str> {
        self.preset_index
            .and_then(|i| self.presets.get(i))
            .map(|p| p.name.as_str())
    }

    pub fn save_scenario(&mut self) {
        let Some(path) = self.state_path.clone() else {
            self.show_flash("Failed to save: no config directory".to_string());
            return;
        };
        match super::state::save_last_scenario(&path, &self.input) {
            Ok(()) => {
                tracing::debug!("Saved scenario to {}", path.display());
                self.show_flash("Saved scenario".to_string());
            }
            Err(e) => self.show_flash(format!("Failed to save: {}", e)),
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_breakdown(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::ScoreBreakdown => InputMode::Normal,
            _ => InputMode::ScoreBreakdown,
        };
    }
}

fn wrap(value: u32, steps: i32, modulus: u32) -> u32 {
    let m = modulus as i64;
    ((value as i64 % m + steps as i64).rem_euclid(m)) as u32
}
