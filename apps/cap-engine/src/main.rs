//! Cap Engine Binary
//!
//! Loads a league snapshot and prints every team's cap report for the
//! snapshot's current day.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin cap-engine -- league.json
//! cargo run --bin cap-engine -- league.json --json
//! ```
//!
//! # Environment Variables
//!
//! - `CAP_ENGINE_CONFIG`: YAML config path (default: built-in league rules)
//! - `RUST_LOG`: Log filter (default: configured level)

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cap_engine::application::{LeagueOffice, LogNewsPublisher};
use cap_engine::config::{Config, load_config};
use cap_engine::domain::ledger::LeagueState;
use cap_engine::telemetry::init_telemetry;
use tracing::info;

const USAGE: &str = "usage: cap-engine <league.json> [--json]";

fn main() -> Result<()> {
    let config = match std::env::var("CAP_ENGINE_CONFIG") {
        Ok(path) => load_config(Some(&path)).with_context(|| format!("Failed to load config {path}"))?,
        Err(_) => Config::default(),
    };
    init_telemetry(&config.observability.logging);

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!(USAGE);
    };
    let as_json = args.any(|arg| arg == "--json");

    let raw = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let league: LeagueState =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse league snapshot {path}"))?;
    info!(
        path = %path,
        season = %league.finance.season,
        day = league.day_index(),
        teams = league.teams.len(),
        "League snapshot loaded"
    );

    let office = LeagueOffice::from_config(&config, league, Arc::new(LogNewsPublisher))?;
    let reports = office.cap_reports();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}", report.summary());
        for violation in &report.compliance.violations {
            println!("  {} {}: {}", violation.severity, violation.code, violation.message);
        }
    }
    Ok(())
}
