use crate::domain::pricing::fee_schedule::round_currency;
use crate::domain::pricing::platform::Platform;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Payout of a single sale on one platform. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformQuote {
    pub platform: Platform,
    pub gross_price: Decimal,
    pub fee: Decimal,
    pub net_proceeds: Decimal,
    /// Net proceeds fall short of the cost basis. Always false when the cost
    /// basis is unknown.
    pub below_floor: bool,
}

impl PlatformQuote {
    pub(crate) fn new(
        platform: Platform,
        gross_price: Decimal,
        fee: Decimal,
        cost_basis: Option<Decimal>,
    ) -> Self {
        let net_proceeds = gross_price - fee;
        Self {
            platform,
            gross_price,
            fee,
            net_proceeds,
            below_floor: cost_basis.is_some_and(|cost| net_proceeds < cost),
        }
    }

    /// Net proceeds minus the cost basis, or the net proceeds when the cost
    /// is unknown.
    pub fn profit(&self, cost_basis: Option<Decimal>) -> Decimal {
        self.net_proceeds - cost_basis.unwrap_or(Decimal::ZERO)
    }

    /// Profit as a percentage of the gross price, one decimal place.
    ///
    /// Saturates at `Decimal::MIN`/`Decimal::MAX` when a tiny price meets a
    /// huge cost basis.
    pub fn profit_margin_pct(&self, cost_basis: Option<Decimal>) -> Decimal {
        if self.gross_price.is_zero() {
            return Decimal::ZERO;
        }
        let profit = self.profit(cost_basis);
        let margin = profit
            .checked_div(self.gross_price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if profit.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            });
        margin.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Quotes for every platform ordered best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub gross_price: Decimal,
    pub cost_basis: Option<Decimal>,
    pub quotes: Vec<PlatformQuote>,
    /// Every platform loses money against the cost basis; `quotes` is then the
    /// least-bad ordering and callers should warn rather than pick silently.
    pub all_below_floor: bool,
}

impl Recommendation {
    pub fn best(&self) -> Option<&PlatformQuote> {
        self.quotes.first()
    }

    /// Quotes that clear the cost-basis floor, best first.
    pub fn viable(&self) -> impl Iterator<Item = &PlatformQuote> {
        self.quotes.iter().filter(|quote| !quote.below_floor)
    }

    /// Amount by which the best quote misses the floor, if it does.
    pub fn shortfall(&self) -> Option<Decimal> {
        let best = self.best()?;
        let cost = self.cost_basis?;
        best.below_floor
            .then(|| round_currency(cost - best.net_proceeds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_below_floor_requires_cost_basis() {
        let quote = PlatformQuote::new(Platform::Ebay, dec!(10), dec!(1.32), None);
        assert!(!quote.below_floor);
        assert_eq!(quote.net_proceeds, dec!(8.68));

        let quote = PlatformQuote::new(Platform::Ebay, dec!(10), dec!(1.32), Some(dec!(9)));
        assert!(quote.below_floor);
    }

    #[test]
    fn test_net_equal_to_cost_is_not_below_floor() {
        let quote = PlatformQuote::new(Platform::Depop, dec!(100), dec!(10), Some(dec!(90)));
        assert!(!quote.below_floor);
    }

    #[test]
    fn test_profit_and_margin() {
        let quote = PlatformQuote::new(Platform::Poshmark, dec!(60), dec!(12), Some(dec!(20)));
        assert_eq!(quote.profit(Some(dec!(20))), dec!(28));
        assert_eq!(quote.profit_margin_pct(Some(dec!(20))), dec!(46.7));
        assert_eq!(quote.profit(None), dec!(48));
    }

    #[test]
    fn test_margin_saturates_for_huge_cost() {
        let quote = PlatformQuote::new(Platform::Depop, dec!(0.01), Decimal::ZERO, None);
        assert_eq!(quote.profit_margin_pct(Some(Decimal::MAX)), Decimal::MIN);
    }

    #[test]
    fn test_margin_of_free_item_is_zero() {
        let quote = PlatformQuote::new(Platform::Mercari, Decimal::ZERO, Decimal::ZERO, None);
        assert_eq!(quote.profit_margin_pct(None), Decimal::ZERO);
    }
}
