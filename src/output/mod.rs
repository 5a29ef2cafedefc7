pub mod formatter;

pub use formatter::{
    day_name, format_breakdown, format_forecast_json, format_forecast_strip, format_forecast_tsv,
    format_gauge, format_input, format_presets, format_score_json, format_score_tsv,
    should_use_colors,
};
