use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::{
    audio::Soundscape,
    breathing::{PhaseDurations, TickConfig},
    patterns::{get_pattern, DEFAULT_PATTERN_ID},
};

/// Settings for one breathing exercise screen. Read once at start-up; the
/// exercise never writes anything back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseConfig {
    pub pattern: String,
    /// Overrides `pattern` when present.
    pub durations: Option<PhaseDurations>,
    pub tick_interval_ms: u64,
    pub soundscape: Option<Soundscape>,
    pub volume: f32,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN_ID.into(),
            durations: None,
            tick_interval_ms: 1_000,
            soundscape: None,
            volume: 0.8,
        }
    }
}

impl ExerciseConfig {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(contents).context("Failed to parse exercise config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read exercise config from {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tickIntervalMs must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.volume) {
            bail!("volume must be between 0.0 and 1.0, got {}", self.volume);
        }
        self.durations()?;
        Ok(())
    }

    pub fn durations(&self) -> Result<PhaseDurations> {
        match self.durations {
            Some(durations) => Ok(durations),
            None => Ok(get_pattern(&self.pattern)?.durations),
        }
    }

    pub fn tick_config(&self) -> Result<TickConfig> {
        TickConfig::every(Duration::from_millis(self.tick_interval_ms))
            .with_context(|| format!("invalid tick interval {}ms", self.tick_interval_ms))
    }
}
