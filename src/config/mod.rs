//! Configuration module for resale-pricing.
//!
//! Settings are read from environment variables (optionally seeded from a
//! `.env` file by the binary). The fee rate table can be overridden by a TOML
//! file, see [`fee_schedule_config`].

mod fee_schedule_config;

pub use fee_schedule_config::{fee_schedule_to_toml, load_fee_schedule, parse_fee_schedule};

use crate::application::pricing_advisor::DEFAULT_MIN_MARKUP;
use crate::domain::pricing::FeeSchedule;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_INVENTORY_PATH: &str = "inventory.json";

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TOML rate table merged over the built-in fee schedule
    pub fee_schedule_path: Option<PathBuf>,
    pub inventory_path: PathBuf,
    /// Suggested prices never drop below cost basis times this
    pub min_markup: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fee_schedule_path: None,
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            min_markup: DEFAULT_MIN_MARKUP,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let fee_schedule_path = non_empty("FEE_SCHEDULE_PATH").map(PathBuf::from);
        let inventory_path = non_empty("INVENTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_PATH));

        let min_markup = match non_empty("MIN_MARKUP") {
            Some(raw) => Decimal::from_str(raw.trim())
                .with_context(|| format!("Failed to parse MIN_MARKUP: {}", raw))?,
            None => DEFAULT_MIN_MARKUP,
        };
        if min_markup < Decimal::ONE {
            anyhow::bail!("MIN_MARKUP must be at least 1, got {}", min_markup);
        }

        Ok(Self {
            fee_schedule_path,
            inventory_path,
            min_markup,
        })
    }

    /// The active fee schedule: built-in defaults, with the configured TOML
    /// file applied on top when present.
    pub fn fee_schedule(&self) -> Result<FeeSchedule> {
        match &self.fee_schedule_path {
            Some(path) => load_fee_schedule(path),
            None => Ok(FeeSchedule::default()),
        }
    }
}
