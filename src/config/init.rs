use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{get_config_path, Config};
use crate::scoring::{validate_scoring, EvAdoption, Factor, FactorWeights, InputOverrides, ScoringConfig};

/// Interactive prompt session over any reader/writer pair.
pub struct Wizard<R, W> {
    input: R,
    output: W,
    typewriter_delay: Duration,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(input: R, output: W, typewriter_delay: Duration) -> Self {
        Self {
            input,
            output,
            typewriter_delay,
        }
    }

    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the wizard finished");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt user with a message and a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    /// Keep asking until the answer parses as a number inside `min..=max`.
    fn prompt_number(&mut self, message: &str, default: f64, min: f64, max: f64) -> Result<f64> {
        loop {
            let raw = self.prompt_with_default(message, &default.to_string())?;
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= min && v <= max => return Ok(v),
                Ok(_) => self.say(&format!("  Invalid: must be between {} and {}. Try again.", min, max))?,
                Err(_) => self.say("  Invalid: not a number. Try again.")?,
            }
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Print text with a typewriter effect, one character at a time.
    fn typewriter(&mut self, text: &str) -> Result<()> {
        if self.typewriter_delay.is_zero() {
            return self.say(text);
        }
        for c in text.chars() {
            write!(self.output, "{}", c).context("Failed to write output")?;
            self.output.flush().ok();
            std::thread::sleep(self.typewriter_delay);
        }
        writeln!(self.output).context("Failed to write output")
    }

    /// Ask for every config section. Does not touch the filesystem.
    pub fn build_config(&mut self) -> Result<Config> {
        self.say("")?;
        self.typewriter("Grid Stress Configuration Wizard")?;
        self.say("================================")?;
        self.say("")?;

        // 1. Default scenario
        self.typewriter("Defaults fill in any scenario field you don't pass on the command line.")?;
        self.typewriter("Hour and day of week follow the local clock unless you pin them here.")?;
        let temperature = self.prompt_number("Temperature (°F)", 72.0, -10.0, 120.0)?;
        let humidity = self.prompt_number("Humidity (%)", 50.0, 0.0, 100.0)?;
        let wind_speed = self.prompt_number("Wind speed (mph)", 5.0, 0.0, 200.0)?;
        let cloud_cover = self.prompt_number("Cloud cover (%)", 30.0, 0.0, 100.0)?;
        let ev_adoption = loop {
            let raw = self.prompt_with_default("EV adoption (low/medium/high)", "medium")?;
            let adoption = raw.parse::<EvAdoption>().unwrap_or(EvAdoption::Unrecognized);
            if adoption == EvAdoption::Unrecognized {
                self.say("  Invalid: expected low, medium or high. Try again.")?;
                continue;
            }
            break adoption;
        };

        let defaults = InputOverrides {
            temperature: Some(temperature),
            humidity: Some(humidity),
            wind_speed: Some(wind_speed),
            cloud_cover: Some(cloud_cover),
            ev_adoption: Some(ev_adoption),
            ..Default::default()
        };

        // 2. Weights
        self.say("")?;
        self.typewriter("Each of the six factors can be scaled. 1.0 keeps the standard model, 0 switches a factor off.")?;
        let tune = self.prompt_yes_no("Adjust factor weights? (n keeps the standard model)", false)?;
        let scoring = if tune {
            let mut weights = FactorWeights::default();
            for factor in Factor::ALL {
                let weight = self.prompt_number(&format!("  {} weight", factor.label()), 1.0, 0.0, 10.0)?;
                if weight != 1.0 {
                    set_weight(&mut weights, factor, weight);
                }
            }
            let scoring = ScoringConfig {
                weights: Some(weights),
            };
            if let Err(errors) = validate_scoring(&scoring) {
                anyhow::bail!("Invalid weights: {}", errors.join("; "));
            }
            Some(scoring)
        } else {
            None
        };

        Ok(Config {
            defaults: Some(defaults),
            scoring,
            presets: Vec::new(),
        })
    }

    /// Run the full wizard: build the config, ask where to save it, write it.
    ///
    /// Returns the written path, or None if the user declined to overwrite.
    pub fn run(&mut self, default_path: PathBuf) -> Result<Option<PathBuf>> {
        let config = self.build_config()?;

        self.say("")?;
        let path_str =
            self.prompt_with_default("Where should the config be saved?", &default_path.display().to_string())?;
        let config_path = PathBuf::from(&path_str);

        if config_path.exists() {
            let overwrite = self.prompt_yes_no(
                &format!("Config already exists at {}. Overwrite?", config_path.display()),
                false,
            )?;
            if !overwrite {
                self.say("Aborted.")?;
                return Ok(None);
            }
        }

        let yaml = serde_saphyr::to_string(&config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&config_path, &yaml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        self.say("")?;
        self.say(&format!("Config written to {}", config_path.display()))?;
        self.typewriter("Add your own scenarios under `presets:` in that file.")?;
        self.say("Run `grid-stress` to open the interactive view.")?;

        Ok(Some(config_path))
    }
}

fn set_weight(weights: &mut FactorWeights, factor: Factor, weight: f64) {
    let slot = match factor {
        Factor::Temperature => &mut weights.temperature,
        Factor::TimeOfDay => &mut weights.time_of_day,
        Factor::DayOfWeek => &mut weights.day_of_week,
        Factor::Wind => &mut weights.wind,
        Factor::Solar => &mut weights.solar,
        Factor::EvCharging => &mut weights.ev_charging,
    };
    *slot = Some(weight);
}

/// Run the interactive init wizard on stdin/stdout.
///
/// If `default_path` is Some, offers that as the config file path.
/// Otherwise, offers the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let default_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    let stdin = std::io::stdin();
    let mut wizard = Wizard::new(stdin.lock(), std::io::stdout(), Duration::from_millis(18));
    wizard.run(default_path)?;
    Ok(())
}
