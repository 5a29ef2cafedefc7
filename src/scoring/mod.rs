pub mod config;
pub mod engine;
pub mod factors;
pub mod forecast;
pub mod input;
pub mod level;
pub mod presets;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, calculate_stress_score, FactorContribution, ScoreBreakdown, ScoreResult};
pub use factors::{lerp, piecewise, Factor};
pub use forecast::{forecast_peak, generate_24_hour_forecast, generate_weighted_forecast, HOURS_PER_DAY};
pub use input::{EvAdoption, InputOverrides, StressInput};
pub use level::{score_to_level, StressLevel};
pub use presets::{builtin_presets, find_preset, merged_presets, Preset};
pub use validation::{validate_input, validate_scoring};
