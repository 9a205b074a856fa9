//! Marketplace fee rules.
//!
//! Each platform is described by a single [`FeeRule`]: a percentage of the
//! sale price, optionally replaced by a flat fee below a price threshold, plus
//! an optional payment-processing component. The full rate table is a
//! [`FeeSchedule`], which is immutable once built and is handed to the engine
//! at construction so alternate tables never touch global state.

use crate::domain::errors::FeeScheduleError;
use crate::domain::pricing::platform::Platform;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Rounds a monetary amount to cents, half-up.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRule {
    /// Fraction of the sale price, e.g. 0.1315 for 13.15%
    pub pct: Decimal,
    /// Charged instead of `pct` when the price is strictly below `threshold`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Decimal::is_zero")]
    pub payment_pct: Decimal,
    #[serde(default, skip_serializing_if = "Decimal::is_zero")]
    pub payment_flat: Decimal,
}

impl FeeRule {
    pub fn percent(pct: Decimal) -> Self {
        Self {
            pct,
            flat_fee: None,
            threshold: None,
            payment_pct: Decimal::ZERO,
            payment_flat: Decimal::ZERO,
        }
    }

    /// Flat fee below `threshold`, `pct` at or above it.
    pub fn tiered(flat_fee: Decimal, pct: Decimal, threshold: Decimal) -> Self {
        Self {
            flat_fee: Some(flat_fee),
            threshold: Some(threshold),
            ..Self::percent(pct)
        }
    }

    pub fn with_payment_processing(mut self, payment_pct: Decimal, payment_flat: Decimal) -> Self {
        self.payment_pct = payment_pct;
        self.payment_flat = payment_flat;
        self
    }

    /// Fee charged on a sale at `gross_price`.
    ///
    /// Callers guarantee `gross_price >= 0`. The result is rounded to cents and
    /// never exceeds `gross_price`.
    pub fn fee_for(&self, gross_price: Decimal) -> Decimal {
        let selling_fee = match (self.flat_fee, self.threshold) {
            (Some(flat), Some(threshold)) if gross_price < threshold => Some(flat),
            _ => gross_price.checked_mul(self.pct),
        };
        let total = selling_fee
            .zip(gross_price.checked_mul(self.payment_pct))
            .and_then(|(selling, payment)| selling.checked_add(payment))
            .and_then(|fee| fee.checked_add(self.payment_flat));

        match total {
            Some(fee) => round_currency(fee).min(gross_price),
            // A total past Decimal::MAX is above any price, so the cap applies
            None => gross_price,
        }
    }

    fn validate(&self, platform: Platform) -> Result<(), FeeScheduleError> {
        for (field, rate) in [("pct", self.pct), ("payment_pct", self.payment_pct)] {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(FeeScheduleError::RateOutOfRange {
                    platform,
                    field,
                    rate,
                });
            }
        }

        let amounts = [
            ("flat_fee", self.flat_fee),
            ("threshold", self.threshold),
            ("payment_flat", Some(self.payment_flat)),
        ];
        for (field, amount) in amounts {
            if let Some(amount) = amount
                && amount < Decimal::ZERO
            {
                return Err(FeeScheduleError::NegativeAmount {
                    platform,
                    field,
                    amount,
                });
            }
        }

        if self.flat_fee.is_some() && self.threshold.is_none() {
            return Err(FeeScheduleError::FlatFeeWithoutThreshold { platform });
        }

        Ok(())
    }
}

/// Complete rate table: exactly one rule per platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    platforms: BTreeMap<Platform, FeeRule>,
}

impl FeeSchedule {
    pub fn new(rules: BTreeMap<Platform, FeeRule>) -> Result<Self, FeeScheduleError> {
        for platform in Platform::ALL {
            let rule = rules
                .get(&platform)
                .ok_or(FeeScheduleError::MissingPlatform { platform })?;
            rule.validate(platform)?;
        }

        Ok(Self { platforms: rules })
    }

    pub fn rule(&self, platform: Platform) -> &FeeRule {
        // Presence of every platform is checked in `new`
        &self.platforms[&platform]
    }

    pub fn rules(&self) -> impl Iterator<Item = (Platform, &FeeRule)> {
        self.platforms.iter().map(|(platform, rule)| (*platform, rule))
    }

    /// Returns a new schedule with `overrides` replacing the matching rules.
    pub fn with_overrides(
        &self,
        overrides: FeeScheduleOverrides,
    ) -> Result<Self, FeeScheduleError> {
        let mut rules = self.platforms.clone();
        for (name, rule) in overrides.platforms {
            let platform = Platform::from_str(&name)
                .map_err(|_| FeeScheduleError::UnknownPlatform { name: name.clone() })?;
            rules.insert(platform, rule);
        }
        Self::new(rules)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let platforms = BTreeMap::from([
            (Platform::Poshmark, FeeRule::tiered(dec!(2.95), dec!(0.20), dec!(15.00))),
            (Platform::Depop, FeeRule::percent(dec!(0.10))),
            (Platform::Mercari, FeeRule::percent(dec!(0.10))),
            (Platform::Ebay, FeeRule::percent(dec!(0.1315))),
            (Platform::Xiaohongshu, FeeRule::percent(dec!(0.05))),
        ]);
        Self { platforms }
    }
}

/// Rate-table document as edited by hand, keyed by platform name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleOverrides {
    #[serde(default)]
    pub platforms: BTreeMap<String, FeeRule>,
}

impl From<&FeeSchedule> for FeeScheduleOverrides {
    fn from(schedule: &FeeSchedule) -> Self {
        Self {
            platforms: schedule
                .rules()
                .map(|(platform, rule)| (platform.key().to_string(), *rule))
                .collect(),
        }
    }
}
