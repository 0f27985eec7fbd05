//! xfixture - xunit-style fixture runner
//!
//! Runs the bundled demo fixtures against a console host and prints each
//! fixture's log followed by its verdict.
//!
//! ## Usage
//!
//! ```bash
//! # Run every demo fixture
//! xfixture run
//!
//! # Run one fixture with cases sorted by description
//! xfixture run --fixture bowling --order alphabetical
//!
//! # List demo fixtures
//! xfixture list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use xfixture::config::{print_env_help, FixtureConfig};
use xfixture::utils::logger::{init_logger, LogLevel};
use xfixture::{CaseOrder, ConsoleHost, Verdict};

mod cli;
mod demo;

use cli::{Args, Command, RunArgs};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = LogLevel::parse(&args.log_level)
        .ok_or_else(|| anyhow::anyhow!("Unknown log level: {}", args.log_level))?;
    init_logger(level);

    match args.command {
        Command::Run(run_args) => run_demos(run_args),
        Command::List => {
            list_demos();
            Ok(())
        }
        Command::Env => {
            print_env_help();
            Ok(())
        }
    }
}

fn run_demos(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => FixtureConfig::load(path)?,
        None => FixtureConfig::resolve().context("Failed to resolve configuration")?,
    };
    if let Some(order) = &args.order {
        config.order = CaseOrder::from_str(order)
            .ok_or_else(|| anyhow::anyhow!("Unknown case order: {order}"))?;
    }
    if let Some(workers) = args.task_workers {
        config.task_workers = workers;
    }
    config.validate()?;

    let selected: Vec<_> = if args.fixture.eq_ignore_ascii_case("all") {
        demo::DEMOS.iter().collect()
    } else {
        vec![demo::find(&args.fixture)
            .ok_or_else(|| anyhow::anyhow!("Unknown fixture: {}", args.fixture))?]
    };

    info!(fixtures = selected.len(), order = %config.order, "running demos");

    let mut failed = Vec::new();
    for demo in selected {
        let host = Arc::new(ConsoleHost::new());
        (demo.run)(host.clone(), &config);

        let verdict = host.verdict();
        println!("{} {} [{}]\n", verdict.symbol(), demo.name, verdict);
        if verdict == Verdict::Failed {
            failed.push(demo.name);
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Failed fixtures: {}", failed.join(", "))
    }
}

fn list_demos() {
    println!("Demo fixtures:");
    for demo in demo::DEMOS {
        println!("  {:12} {}", demo.name, demo.description);
    }
}
