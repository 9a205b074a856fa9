//! Fee rate table loading from TOML.
//!
//! The file only needs the platforms it changes; everything else keeps the
//! built-in rule.
//!
//! ```toml
//! [platforms.poshmark]
//! flat_fee = "2.95"
//! pct = "0.20"
//! threshold = "15.00"
//!
//! [platforms.depop]
//! pct = "0.10"
//! payment_pct = "0.029"
//! payment_flat = "0.30"
//! ```

use crate::domain::pricing::{FeeSchedule, FeeScheduleOverrides};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn parse_fee_schedule(content: &str) -> Result<FeeSchedule> {
    let overrides: FeeScheduleOverrides =
        toml::from_str(content).context("Failed to parse fee schedule TOML")?;
    let schedule = FeeSchedule::default()
        .with_overrides(overrides)
        .context("Invalid fee schedule")?;
    Ok(schedule)
}

pub fn load_fee_schedule(path: &Path) -> Result<FeeSchedule> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fee schedule file: {:?}", path))?;
    let schedule =
        parse_fee_schedule(&content).with_context(|| format!("In fee schedule file {:?}", path))?;

    info!("Loaded fee schedule from {:?}", path);
    Ok(schedule)
}

/// Renders the complete schedule in the same TOML shape `parse_fee_schedule`
/// accepts.
pub fn fee_schedule_to_toml(schedule: &FeeSchedule) -> Result<String> {
    toml::to_string_pretty(&FeeScheduleOverrides::from(schedule))
        .context("Failed to serialize fee schedule")
}
