use std::fs;
use std::path::Path;
use std::time::Duration;

use hats_core::{ErrorInfo, HatsError};
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Wall-clock budget for the randomized strategy, in milliseconds.
    #[serde(default = "default_budget_ms")]
    pub budget_ms: u64,
    /// Master seed; unset draws a fresh seed from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Optional cap on randomized trials, applied alongside the budget.
    #[serde(default)]
    pub max_trials: Option<u64>,
}

fn default_budget_ms() -> u64 {
    1000
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            budget_ms: default_budget_ms(),
            seed: None,
            max_trials: None,
        }
    }
}

impl SearchOptions {
    /// Options with a fixed seed and the default budget.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Wall-clock budget as a [`Duration`].
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    /// Rejects option combinations that cannot run.
    pub fn validate(&self) -> Result<(), HatsError> {
        if self.max_trials == Some(0) {
            return Err(HatsError::Config(
                ErrorInfo::new("max-trials", "max_trials must be at least 1")
                    .with_hint("omit max_trials to rely on the time budget alone"),
            ));
        }
        Ok(())
    }

    /// Parses options from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, HatsError> {
        let options: Self = serde_yaml::from_str(text)
            .map_err(|err| HatsError::Serde(ErrorInfo::new("search-options-yaml", err.to_string())))?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self, HatsError> {
        let text = fs::read_to_string(path).map_err(|err| {
            HatsError::Config(
                ErrorInfo::new("search-options-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }
}
