//! Heuristic grid stress index.
//!
//! Six bounded sub-scores (temperature, time of day, day of week, wind relief,
//! solar depletion, EV charging) are summed, rounded and clamped to 0..=100.
//! The scoring core in [`scoring`] is pure; the remaining modules are the CLI,
//! config and terminal demo built on top of it.

pub mod config;
pub mod output;
pub mod scenario;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;

pub use scoring::{
    calculate_stress_score, generate_24_hour_forecast, score_to_level, EvAdoption, StressInput, StressLevel,
};
