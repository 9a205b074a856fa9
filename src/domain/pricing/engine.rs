//! Fee & recommendation engine.
//!
//! Pure arithmetic over a [`FeeSchedule`]: no logging, no I/O, no hidden
//! state. Every operation is safe to call concurrently and recomputes from
//! scratch on each call.
//!
//! # Example
//! ```
//! use resale_pricing::domain::pricing::{FeeEngine, Platform};
//! use rust_decimal_macros::dec;
//!
//! let engine = FeeEngine::default();
//! let quote = engine.compute_quote(Platform::Poshmark, dec!(15.00)).unwrap();
//! assert_eq!(quote.fee, dec!(3.00));
//!
//! let recommendation = engine.recommend_best(dec!(100), Some(dec!(90))).unwrap();
//! assert!(!recommendation.best().unwrap().below_floor);
//! ```

use crate::domain::errors::PricingError;
use crate::domain::pricing::fee_schedule::FeeSchedule;
use crate::domain::pricing::platform::Platform;
use crate::domain::pricing::quote::{PlatformQuote, Recommendation};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default)]
pub struct FeeEngine {
    schedule: FeeSchedule,
}

impl FeeEngine {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Quote a sale at `gross_price` on a single platform.
    pub fn compute_quote(
        &self,
        platform: Platform,
        gross_price: Decimal,
    ) -> Result<PlatformQuote, PricingError> {
        ensure_non_negative("gross_price", gross_price)?;
        Ok(self.quote(platform, gross_price, None))
    }

    /// One quote per platform, in platform enumeration order.
    pub fn compute_all_quotes(
        &self,
        gross_price: Decimal,
    ) -> Result<Vec<PlatformQuote>, PricingError> {
        ensure_non_negative("gross_price", gross_price)?;
        Ok(self.quotes_for(gross_price, None))
    }

    /// All quotes ordered best first.
    ///
    /// Quotes that clear `cost_basis` always precede quotes below it; within
    /// each group quotes are ordered by net proceeds, descending, with ties
    /// kept in platform enumeration order.
    pub fn recommend_best(
        &self,
        gross_price: Decimal,
        cost_basis: Option<Decimal>,
    ) -> Result<Recommendation, PricingError> {
        ensure_non_negative("gross_price", gross_price)?;
        if let Some(cost) = cost_basis {
            ensure_non_negative("cost_basis", cost)?;
        }

        let mut quotes = self.quotes_for(gross_price, cost_basis);
        // Stable sort: equal keys keep enumeration order
        quotes.sort_by(|a, b| {
            a.below_floor
                .cmp(&b.below_floor)
                .then_with(|| b.net_proceeds.cmp(&a.net_proceeds))
        });

        let all_below_floor = cost_basis.is_some() && quotes.iter().all(|q| q.below_floor);

        Ok(Recommendation {
            gross_price,
            cost_basis,
            quotes,
            all_below_floor,
        })
    }

    fn quotes_for(&self, gross_price: Decimal, cost_basis: Option<Decimal>) -> Vec<PlatformQuote> {
        Platform::ALL
            .iter()
            .map(|platform| self.quote(*platform, gross_price, cost_basis))
            .collect()
    }

    fn quote(
        &self,
        platform: Platform,
        gross_price: Decimal,
        cost_basis: Option<Decimal>,
    ) -> PlatformQuote {
        let fee = self.schedule.rule(platform).fee_for(gross_price);
        PlatformQuote::new(platform, gross_price, fee, cost_basis)
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO {
        return Err(PricingError::InvalidInput { field, value });
    }
    Ok(())
}
