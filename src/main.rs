use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use grid_stress::scenario::{self, ScenarioRequest, UnknownPresetError};
use grid_stress::scoring::{self, EvAdoption, InputOverrides, ScoreResult, StressInput};
use grid_stress::{config, output, stderr_buffer, tui};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Tsv,
    Json,
}

/// Scenario fields. Anything left out comes from the preset, the config
/// defaults or the clock.
#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Start from a named preset (see `grid-stress presets`)
    #[arg(short, long)]
    preset: Option<String>,

    /// Air temperature in °F
    #[arg(short = 't', long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Relative humidity in percent
    #[arg(long)]
    humidity: Option<f64>,

    /// Hour of day, 0-23
    #[arg(long)]
    hour: Option<u32>,

    /// Day of week, 0 = Sunday
    #[arg(long)]
    day: Option<u32>,

    /// Wind speed in mph
    #[arg(short, long)]
    wind: Option<f64>,

    /// Cloud cover in percent
    #[arg(long)]
    cloud: Option<f64>,

    /// EV adoption: low, medium or high
    #[arg(long)]
    ev: Option<String>,
}

impl InputArgs {
    fn overrides(&self) -> InputOverrides {
        InputOverrides {
            temperature: self.temperature,
            humidity: self.humidity,
            hour: self.hour,
            day_of_week: self.day,
            wind_speed: self.wind,
            cloud_cover: self.cloud,
            ev_adoption: self
                .ev
                .as_deref()
                .map(|s| s.parse().unwrap_or(EvAdoption::Unrecognized)),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one scenario
    Score {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Show each factor's contribution
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Print the 24-hour stress profile for a scenario
    Forecast {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// List built-in and configured presets with their scores
    Presets,
    /// Interactive slider view (default if no subcommand)
    Tui {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "grid-stress")]
#[command(about = "Grid stress index from weather and time of day", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/grid-stress/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(|| stderr_buffer::BufferedStderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let command = cli.command.unwrap_or(Commands::Tui {
        input: InputArgs::default(),
    });

    if let Commands::Init = command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring_config = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = scoring::validate_scoring(&scoring_config) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();
    let clock = scenario::clock_fields(&chrono::Local::now());

    let resolve = |args: &InputArgs, saved: Option<StressInput>| -> StressInput {
        let request = ScenarioRequest {
            preset: args.preset.clone(),
            flags: args.overrides(),
            saved,
        };
        match scenario::resolve_input(&config, &request, clock) {
            Ok(input) => {
                if let Err(problems) = scoring::validate_input(&input) {
                    for problem in problems {
                        warn!("{}", problem);
                    }
                }
                debug!(?input, "Resolved scenario");
                input
            }
            Err(e) => {
                eprintln!("{}", e);
                let code = if e.downcast_ref::<UnknownPresetError>().is_some() {
                    EXIT_INPUT
                } else {
                    EXIT_FAILURE
                };
                std::process::exit(code);
            }
        }
    };

    match command {
        Commands::Score {
            input,
            format,
            breakdown,
        } => {
            let input = resolve(&input, None);
            let result = scoring::calculate_score(&input, &scoring_config);
            print_report(render_score(&input, &result, format, breakdown, use_colors));
        }
        Commands::Forecast { input, format } => {
            let input = resolve(&input, None);
            let forecast = scoring::generate_weighted_forecast(&input, &scoring_config);
            match format {
                Format::Table => {
                    println!("{}", output::format_input(&input));
                    println!("{}", output::format_forecast_strip(&forecast, use_colors));
                }
                Format::Tsv => println!("{}", output::format_forecast_tsv(&forecast)),
                Format::Json => print_report(output::format_forecast_json(&input, &forecast)),
            }
        }
        Commands::Presets => {
            let presets = scenario::available_presets(&config);
            let rows: Vec<_> = presets
                .iter()
                .map(|p| (p, scoring::calculate_score(&p.input, &scoring_config).score))
                .collect();
            println!("{}", output::format_presets(&rows, use_colors));
        }
        Commands::Tui { input } => {
            let state_path = match tui::get_state_path() {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("Scenario saving disabled: {:#}", e);
                    None
                }
            };
            let saved = state_path.as_deref().and_then(|path| match tui::load_last_scenario(path) {
                Ok(state) => state.map(|s| s.input),
                Err(e) => {
                    warn!("Ignoring saved scenario: {:#}", e);
                    None
                }
            });
            let start = resolve(&input, saved);
            let presets = scenario::available_presets(&config);
            let app = tui::App::new(start, scoring_config, presets, state_path);
            if let Err(e) = tui::run_tui(app) {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Init => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Text for `grid-stress score`. The breakdown is only added to the table
/// when `breakdown` is set.
fn render_score(
    input: &StressInput,
    result: &ScoreResult,
    format: Format,
    breakdown: bool,
    use_colors: bool,
) -> serde_json::Result<String> {
    match format {
        Format::Table => {
            let mut lines = vec![
                output::format_input(input),
                output::format_gauge(result.score, use_colors),
            ];
            if breakdown {
                lines.push(output::format_breakdown(result, use_colors));
            }
            Ok(lines.join("\n"))
        }
        Format::Tsv => Ok(output::format_score_tsv(result)),
        Format::Json => output::format_score_json(input, result),
    }
}

fn print_report(report: serde_json::Result<String>) {
    match report {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_stress::scoring::{builtin_presets, ScoringConfig};

    fn heatwave_result() -> (StressInput, ScoreResult) {
        let input = builtin_presets()[0].input;
        let result = scoring::calculate_score(&input, &ScoringConfig::default());
        (input, result)
    }

    #[test]
    fn test_score_table_omits_breakdown_by_default() {
        let (input, result) = heatwave_result();
        let text = render_score(&input, &result, Format::Table, false, false).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("Total"));
    }

    #[test]
    fn test_score_table_breakdown_flag() {
        let (input, result) = heatwave_result();
        let text = render_score(&input, &result, Format::Table, true, false).unwrap();
        assert!(text.contains("Total"));
        assert!(text.contains("-> 82"));
    }

    #[test]
    fn test_verbose_flag_leaves_breakdown_off() {
        let cli = Cli::parse_from(["grid-stress", "-v", "score", "--preset", "heatwave"]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Score { breakdown, .. }) => assert!(!breakdown),
            other => panic!("expected score command, got {:?}", other),
        }
    }

    #[test]
    fn test_score_tsv() {
        let (input, result) = heatwave_result();
        let text = render_score(&input, &result, Format::Tsv, true, false).unwrap();
        assert_eq!(text, "82\tCritical\t#ef4444");
    }
}
