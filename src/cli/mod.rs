//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// xunit-style fixture runner
#[derive(Parser, Debug)]
#[command(name = "xfixture")]
#[command(version)]
#[command(about = "Run the bundled xunit-style demo fixtures")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run demo fixtures
    Run(RunArgs),

    /// List demo fixtures
    List,

    /// Show supported environment variables
    Env,
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Demo fixture to run (bowling, arithmetic, table, all)
    #[arg(short, long, default_value = "all")]
    pub fixture: String,

    /// Case order (registration, alphabetical)
    #[arg(short, long)]
    pub order: Option<String>,

    /// Worker threads for task cases
    #[arg(long)]
    pub task_workers: Option<usize>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_args() {
        let args = Args::parse_from(["xfixture", "run", "--fixture", "bowling", "-o", "sorted"]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.fixture, "bowling");
                assert_eq!(run.order.as_deref(), Some("sorted"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.log_level, "warn");
    }
}
