//! Configuration module
//!
//! Handles loading fixture configuration from files and the environment.

mod env;

pub use env::{print_env_help, EnvBuilder, EnvConfig, EnvGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Order in which registered cases are executed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOrder {
    /// The order cases were registered in
    #[default]
    Registration,
    /// Sorted by case description, for golden-file comparisons
    Alphabetical,
}

impl CaseOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "registration" | "registered" => Some(CaseOrder::Registration),
            "alphabetical" | "sorted" => Some(CaseOrder::Alphabetical),
            _ => None,
        }
    }
}

impl fmt::Display for CaseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseOrder::Registration => write!(f, "registration"),
            CaseOrder::Alphabetical => write!(f, "alphabetical"),
        }
    }
}

/// Fixture configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Case execution order
    pub order: CaseOrder,

    /// Worker threads of the runtime that drives task cases
    pub task_workers: usize,

    /// Mirror fixture log lines into tracing
    pub trace_log: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            order: CaseOrder::Registration,
            task_workers: 2,
            trace_log: false,
        }
    }
}

impl FixtureConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.task_workers == 0 {
            anyhow::bail!("task_workers must be at least 1");
        }
        Ok(())
    }

    /// Defaults, overlaid with the file named by `XFIXTURE_CONFIG`, overlaid
    /// with the remaining `XFIXTURE_*` variables.
    pub fn resolve() -> Result<Self> {
        let env = EnvConfig::load();
        let mut config = match &env.config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        env.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
