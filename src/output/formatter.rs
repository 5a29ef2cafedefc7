use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{forecast_peak, Preset, ScoreResult, StressInput, StressLevel};

const GAUGE_WIDTH: usize = 20;
const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn paint(text: &str, level: StressLevel, use_colors: bool) -> String {
    if use_colors {
        let (r, g, b) = level.rgb();
        text.truecolor(r, g, b).to_string()
    } else {
        text.to_string()
    }
}

pub fn day_name(day_of_week: u32) -> &'static str {
    DAY_NAMES.get(day_of_week as usize).copied().unwrap_or("???")
}

/// One-line description of a scenario.
pub fn format_input(input: &StressInput) -> String {
    format!(
        "{}°F, {}% humidity, {} {:02}:00, wind {} mph, {}% cloud, EV {}",
        input.temperature,
        input.humidity,
        day_name(input.day_of_week),
        input.hour,
        input.wind_speed,
        input.cloud_cover,
        input.ev_adoption
    )
}

/// Horizontal gauge: filled share proportional to the score.
/// Format: "[██████████░░░░░░░░░░]  52 Moderate"
pub fn format_gauge(score: u8, use_colors: bool) -> String {
    let level = StressLevel::from_score(score);
    let filled = (score as usize * GAUGE_WIDTH + 50) / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH.saturating_sub(filled))
    );
    let label = format!("{:>3} {}", score, level.label());
    if use_colors {
        format!("[{}] {}", paint(&bar, level, true), paint(&label, level, true).bold())
    } else {
        format!("[{}] {}", bar, label)
    }
}

/// Per-factor contributions, one per line, with the total underneath.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines: Vec<String> = result
        .breakdown
        .factors
        .iter()
        .map(|c| {
            let weight = if c.weight != 1.0 {
                format!("  (x{} weight)", c.weight)
            } else {
                String::new()
            };
            let label = format!("{:<16}", c.factor.label());
            let label = if use_colors {
                label.dimmed().to_string()
            } else {
                label
            };
            format!("  {}{:>+7.2}{}", label, c.weighted(), weight)
        })
        .collect();
    lines.push(format!(
        "  {:<16}{:>7.2} -> {}",
        "Total",
        result.breakdown.raw_total,
        result.score
    ));
    lines.join("\n")
}

fn spark(score: u8) -> char {
    let idx = (score as usize * (SPARK_CHARS.len() - 1) + 50) / 100;
    SPARK_CHARS[idx.min(SPARK_CHARS.len() - 1)]
}

/// 24-hour strip. Wide terminals (and pipes) get a column per hour with the
/// score underneath; narrow terminals get a bare sparkline.
pub fn format_forecast_strip(forecast: &[u8], use_colors: bool) -> String {
    let wide = get_terminal_width().map_or(true, |w| w >= forecast.len() * 4 + 6);
    let cell_width = if wide { 4 } else { 1 };

    let bars: String = forecast
        .iter()
        .map(|&score| {
            let glyph = format!("{:^width$}", spark(score), width = cell_width);
            paint(&glyph, StressLevel::from_score(score), use_colors)
        })
        .collect();

    let mut lines = Vec::new();
    if wide {
        lines.push(format!("Hour  {}", (0..forecast.len()).map(|h| format!("{:^4}", h)).collect::<String>()));
        lines.push(format!("      {}", bars));
        lines.push(format!(
            "Score {}",
            forecast
                .iter()
                .map(|&s| paint(&format!("{:^4}", s), StressLevel::from_score(s), use_colors))
                .collect::<String>()
        ));
    } else {
        lines.push(bars);
    }

    if let Some((hour, score)) = forecast_peak(forecast) {
        lines.push(format!(
            "Peak {:02}:00 at {} ({})",
            hour,
            score,
            StressLevel::from_score(score).label()
        ));
    }
    lines.join("\n")
}

/// Score as tab-separated values for scripting: score, level, color
pub fn format_score_tsv(result: &ScoreResult) -> String {
    format!("{}\t{}\t{}", result.score, result.level.label(), result.level.color())
}

/// Forecast as tab-separated values, one hour per line: hour, score, level
pub fn format_forecast_tsv(forecast: &[u8]) -> String {
    forecast
        .iter()
        .enumerate()
        .map(|(hour, &score)| format!("{}\t{}\t{}", hour, score, StressLevel::from_score(score).label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Preset table: name, score, level, description
pub fn format_presets(presets: &[(&Preset, u8)], use_colors: bool) -> String {
    if presets.is_empty() {
        return "No presets defined.".to_string();
    }
    let name_width = presets.iter().map(|(p, _)| p.name.chars().count()).max().unwrap_or(0);

    presets
        .iter()
        .map(|(preset, score)| {
            let level = StressLevel::from_score(*score);
            let score_str = paint(&format!("{:>3} {:<8}", score, level.label()), level, use_colors);
            let name = format!("{:<width$}", preset.name, width = name_width);
            let name = if use_colors { name.bold().to_string() } else { name };
            format!(
                "{}  {}  {}",
                name,
                score_str,
                preset.description.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub input: &'a StressInput,
    pub score: u8,
    pub level: &'static str,
    pub color: &'static str,
    pub factors: Vec<FactorReport>,
}

#[derive(Debug, Serialize)]
pub struct FactorReport {
    pub factor: &'static str,
    pub value: f64,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct ForecastReport<'a> {
    pub input: &'a StressInput,
    pub scores: &'a [u8],
    pub peak_hour: Option<usize>,
    pub peak_score: Option<u8>,
}

pub fn format_score_json(input: &StressInput, result: &ScoreResult) -> serde_json::Result<String> {
    let report = ScoreReport {
        input,
        score: result.score,
        level: result.level.label(),
        color: result.level.color(),
        factors: result
            .breakdown
            .factors
            .iter()
            .map(|c| FactorReport {
                factor: c.factor.label(),
                value: c.value,
                weight: c.weight,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

pub fn format_forecast_json(input: &StressInput, forecast: &[u8]) -> serde_json::Result<String> {
    let peak = forecast_peak(forecast);
    let report = ForecastReport {
        input,
        scores: forecast,
        peak_hour: peak.map(|(h, _)| h),
        peak_score: peak.map(|(_, s)| s),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{builtin_presets, calculate_score, generate_24_hour_forecast, ScoringConfig};
    use pretty_assertions::assert_eq;

    fn heatwave() -> StressInput {
        builtin_presets()[0].input
    }

    #[test]
    fn test_gauge_empty() {
        assert_eq!(format_gauge(0, false), format!("[{}]   0 Low", "░".repeat(20)));
    }

    #[test]
    fn test_gauge_full() {
        assert_eq!(format_gauge(100, false), format!("[{}] 100 Critical", "█".repeat(20)));
    }

    #[test]
    fn test_gauge_partial_rounds() {
        // 53 -> 10.6 cells -> 11
        let gauge = format_gauge(53, false);
        assert!(gauge.starts_with(&format!("[{}{}]", "█".repeat(11), "░".repeat(9))));
        assert!(gauge.ends_with(" 53 Moderate"));
    }

    #[test]
    fn test_format_input() {
        let line = format_input(&heatwave());
        assert_eq!(
            line,
            "102°F, 45% humidity, Tue 17:00, wind 3 mph, 10% cloud, EV high"
        );
    }

    #[test]
    fn test_day_name_out_of_range() {
        assert_eq!(day_name(0), "Sun");
        assert_eq!(day_name(9), "???");
    }

    #[test]
    fn test_breakdown_lines() {
        let result = calculate_score(&heatwave(), &ScoringConfig::default());
        let text = format_breakdown(&result, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("Temperature"));
        assert!(lines[0].contains("+28.85"));
        assert!(lines[5].contains("EV charging"));
        assert!(lines[5].contains("+15.00"));
        assert!(lines[6].ends_with("-> 82"));
    }

    #[test]
    fn test_spark_levels() {
        assert_eq!(spark(0), '▁');
        assert_eq!(spark(100), '█');
        assert_eq!(spark(50), '▅');
    }

    #[test]
    fn test_forecast_strip_has_peak_line() {
        let forecast = generate_24_hour_forecast(&heatwave());
        let strip = format_forecast_strip(&forecast, false);
        assert!(strip.lines().last().unwrap().starts_with("Peak 17:00 at 82"));
    }

    #[test]
    fn test_forecast_tsv() {
        let forecast = generate_24_hour_forecast(&heatwave());
        let tsv = format_forecast_tsv(&forecast);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 24);
        assert_eq!(lines[17], "17\t82\tCritical");
    }

    #[test]
    fn test_score_tsv() {
        let result = calculate_score(&heatwave(), &ScoringConfig::default());
        assert_eq!(format_score_tsv(&result), "82\tCritical\t#ef4444");
    }

    #[test]
    fn test_score_json() {
        let input = heatwave();
        let result = calculate_score(&input, &ScoringConfig::default());
        let json = format_score_json(&input, &result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 82);
        assert_eq!(value["level"], "Critical");
        assert_eq!(value["input"]["ev_adoption"], "high");
        assert_eq!(value["factors"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_forecast_json() {
        let input = heatwave();
        let forecast = generate_24_hour_forecast(&input);
        let json = format_forecast_json(&input, &forecast).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scores"].as_array().unwrap().len(), 24);
        assert_eq!(value["peak_hour"], 17);
    }

    #[test]
    fn test_presets_table() {
        let presets = builtin_presets();
        let rows: Vec<(&Preset, u8)> = presets.iter().map(|p| (p, 10)).collect();
        let table = format_presets(&rows, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), presets.len());
        assert!(lines[0].starts_with("heatwave "));
        assert!(lines[0].contains(" 10 Low"));
    }

    #[test]
    fn test_presets_empty() {
        assert_eq!(format_presets(&[], false), "No presets defined.");
    }
}
