use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::scoring::StressInput;

const STATE_VERSION: u32 = 1;

/// Scenario left on screen when the demo was last saved.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LastScenario {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub input: StressInput,
}

impl LastScenario {
    pub fn new(input: StressInput) -> Self {
        Self {
            version: STATE_VERSION,
            saved_at: Utc::now(),
            input,
        }
    }
}

/// Get the default state file path (~/.config/grid-stress/last_scenario.json)
pub fn get_state_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("last_scenario.json"))
}

/// Load the saved scenario.
///
/// Returns None if the file doesn't exist.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_last_scenario(path: &Path) -> Result<Option<LastScenario>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open scenario file at {}", path.display()))?;

    let state: LastScenario =
        serde_json::from_reader(file).context("Failed to load saved scenario")?;

    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported scenario file version: {}", state.version);
    }

    Ok(Some(state))
}

/// Save the scenario atomically so the file is never left half-written.
/// Creates the parent directory if it doesn't exist.
pub fn save_last_scenario(path: &Path, input: &StressInput) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &LastScenario::new(*input))
        .context("Failed to serialize scenario")?;

    file.commit().context("Failed to save scenario")?;

    Ok(())
}
