//! Environment variable configuration
//!
//! Provides environment variable overrides for fixture configuration.

use std::env;

use super::{CaseOrder, FixtureConfig};

/// Environment variable prefix
const ENV_PREFIX: &str = "XFIXTURE";

/// Configuration read from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Case order from XFIXTURE_ORDER
    pub order: Option<CaseOrder>,
    /// Task runtime workers from XFIXTURE_TASK_WORKERS
    pub task_workers: Option<usize>,
    /// Log mirroring from XFIXTURE_TRACE_LOG
    pub trace_log: Option<bool>,
    /// Config file from XFIXTURE_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            order: get_env("ORDER").and_then(|v| CaseOrder::from_str(&v)),
            task_workers: get_env_parse("TASK_WORKERS"),
            trace_log: get_env_bool("TRACE_LOG"),
            config_file: get_env("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.order.is_some()
            || self.task_workers.is_some()
            || self.trace_log.is_some()
            || self.config_file.is_some()
    }

    /// Overwrite the fields of `config` that are set in the environment
    pub fn apply_to(&self, config: &mut FixtureConfig) {
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(workers) = self.task_workers {
            config.task_workers = workers;
        }
        if let Some(trace_log) = self.trace_log {
            config.trace_log = trace_log;
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn order(mut self, order: CaseOrder) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_ORDER"), order.to_string()));
        self
    }

    pub fn task_workers(mut self, workers: usize) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TASK_WORKERS"), workers.to_string()));
        self
    }

    pub fn trace_log(mut self, enabled: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TRACE_LOG"), enabled.to_string()));
        self
    }

    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_CONFIG"), path.into()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all XFIXTURE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_ORDER          Case order (registration, alphabetical)");
    println!("  {ENV_PREFIX}_TASK_WORKERS   Worker threads for task cases");
    println!("  {ENV_PREFIX}_TRACE_LOG      Mirror fixture logs into tracing (true/false)");
    println!("  {ENV_PREFIX}_CONFIG         Path to configuration file (YAML or JSON)");
}
