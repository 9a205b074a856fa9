//! Resale price estimates from a retail price or from comparable sales.

use crate::domain::errors::PricingError;
use crate::domain::market::condition::Condition;
use crate::domain::pricing::engine::ensure_non_negative;
use crate::domain::pricing::round_currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fewer comparables than this are not treated as market data
pub const MIN_COMPARABLES: usize = 3;

/// Prices at or above this multiple of the mean are discarded as outliers
const OUTLIER_MEAN_MULTIPLE: Decimal = dec!(3);

const QUICK_SALE_MULTIPLIER: Decimal = dec!(0.85);
const MAX_VALUE_MULTIPLIER: Decimal = dec!(1.2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
    pub avg: Decimal,
}

/// The three asking prices offered to a seller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoints {
    pub quick_sale: Decimal,
    pub fair_price: Decimal,
    pub max_value: Decimal,
}

impl From<PriceRange> for PricePoints {
    fn from(range: PriceRange) -> Self {
        Self {
            quick_sale: range.low,
            fair_price: range.avg,
            max_value: range.high,
        }
    }
}

/// Estimate resale value from the original retail price.
pub fn estimate_from_retail(
    retail_price: Decimal,
    condition: Condition,
) -> Result<PriceRange, PricingError> {
    ensure_non_negative("retail_price", retail_price)?;

    // Every multiplier is below one, so none of these can overflow
    let (low_mult, high_mult) = condition.retail_multipliers();
    let mid_mult = (low_mult + high_mult) / dec!(2);
    Ok(PriceRange {
        low: round_currency(retail_price * low_mult),
        high: round_currency(retail_price * high_mult),
        avg: round_currency(retail_price * mid_mult),
    })
}

/// A sold listing returned by a comparable-sales provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparableListing {
    pub title: String,
    pub price: Decimal,
    /// Marketplace the sale happened on, as reported by the provider
    pub platform: String,
    pub url: String,
}

/// Summary of comparable sold prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Listings kept after outlier filtering
    pub count: usize,
    pub min: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
    pub median: Decimal,
    pub price_points: PricePoints,
}

impl MarketSnapshot {
    /// Summarise comparable listings. Returns `None` with fewer than
    /// [`MIN_COMPARABLES`] listings.
    pub fn from_listings(listings: &[ComparableListing]) -> Option<Self> {
        let prices: Vec<Decimal> = listings
            .iter()
            .map(|listing| listing.price)
            .filter(|price| *price >= Decimal::ZERO)
            .collect();
        if prices.len() < MIN_COMPARABLES {
            return None;
        }

        // No price can reach a cutoff past Decimal::MAX
        let mut kept: Vec<Decimal> = match mean(&prices).checked_mul(OUTLIER_MEAN_MULTIPLE) {
            Some(cutoff) => prices.iter().copied().filter(|p| *p < cutoff).collect(),
            None => prices.clone(),
        };
        if kept.is_empty() {
            kept = prices;
        }
        kept.sort();

        let median = median_of_sorted(&kept);
        Some(Self {
            count: kept.len(),
            min: kept[0],
            max: kept[kept.len() - 1],
            mean: round_currency(mean(&kept)),
            median: round_currency(median),
            price_points: PricePoints {
                quick_sale: round_currency(median * QUICK_SALE_MULTIPLIER),
                fair_price: round_currency(median),
                max_value: round_currency(median.saturating_mul(MAX_VALUE_MULTIPLIER)),
            },
        })
    }
}

fn mean(prices: &[Decimal]) -> Decimal {
    let count = Decimal::from(prices.len());
    match prices
        .iter()
        .try_fold(Decimal::ZERO, |total, price| total.checked_add(*price))
    {
        Some(total) => total / count,
        None => prices.iter().map(|price| *price / count).sum(),
    }
}

fn median_of_sorted(sorted: &[Decimal]) -> Decimal {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return sorted[mid];
    }
    let (lower, upper) = (sorted[mid - 1], sorted[mid]);
    match lower.checked_add(upper) {
        Some(total) => total / dec!(2),
        None => lower / dec!(2) + upper / dec!(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: Decimal) -> ComparableListing {
        ComparableListing {
            title: "Dr. Martens Jadon".to_string(),
            price,
            platform: "eBay".to_string(),
            url: "https://example.invalid/listing".to_string(),
        }
    }

    #[test]
    fn test_retail_estimate_good_condition() {
        let range = estimate_from_retail(dec!(200), Condition::Good).unwrap();
        assert_eq!(range.low, dec!(60.00));
        assert_eq!(range.high, dec!(100.00));
        assert_eq!(range.avg, dec!(80.00));
    }

    #[test]
    fn test_retail_estimate_rounds_half_up() {
        // 9.99 * 0.45 = 4.4955
        let range = estimate_from_retail(dec!(9.99), Condition::Excellent).unwrap();
        assert_eq!(range.low, dec!(4.50));
    }

    #[test]
    fn test_retail_estimate_rejects_negative() {
        assert!(matches!(
            estimate_from_retail(dec!(-10), Condition::New),
            Err(PricingError::InvalidInput {
                field: "retail_price",
                ..
            })
        ));
    }

    #[test]
    fn test_snapshot_needs_three_listings() {
        let listings = vec![listing(dec!(40)), listing(dec!(50))];
        assert!(MarketSnapshot::from_listings(&listings).is_none());
    }

    #[test]
    fn test_snapshot_price_points_from_median() {
        let listings: Vec<_> = [dec!(30), dec!(50), dec!(40), dec!(60)]
            .into_iter()
            .map(listing)
            .collect();

        let snapshot = MarketSnapshot::from_listings(&listings).unwrap();
        assert_eq!(snapshot.count, 4);
        assert_eq!(snapshot.min, dec!(30));
        assert_eq!(snapshot.max, dec!(60));
        assert_eq!(snapshot.median, dec!(45.00));
        assert_eq!(snapshot.price_points.quick_sale, dec!(38.25));
        assert_eq!(snapshot.price_points.fair_price, dec!(45.00));
        assert_eq!(snapshot.price_points.max_value, dec!(54.00));
    }

    #[test]
    fn test_snapshot_drops_outliers() {
        // mean = 100, cutoff = 300: the 340 listing is dropped
        let listings: Vec<_> = [dec!(20), dec!(20), dec!(20), dec!(340)]
            .into_iter()
            .map(listing)
            .collect();

        let snapshot = MarketSnapshot::from_listings(&listings).unwrap();
        assert_eq!(snapshot.count, 3);
        assert_eq!(snapshot.max, dec!(20));
        assert_eq!(snapshot.median, dec!(20.00));
    }

    #[test]
    fn test_retail_estimate_at_decimal_max() {
        for condition in [Condition::New, Condition::Fair] {
            let range = estimate_from_retail(Decimal::MAX, condition).unwrap();
            assert!(range.low <= range.avg && range.avg <= range.high);
            assert!(range.high < Decimal::MAX);
        }
    }

    #[test]
    fn test_snapshot_of_huge_prices() {
        let listings: Vec<_> = [Decimal::MAX; 3].into_iter().map(listing).collect();
        let snapshot = MarketSnapshot::from_listings(&listings).unwrap();
        assert_eq!(snapshot.count, 3);
        assert_eq!(snapshot.price_points.fair_price, Decimal::MAX);
        assert_eq!(snapshot.price_points.max_value, Decimal::MAX);
        assert!(snapshot.price_points.quick_sale < Decimal::MAX);

        let listings: Vec<_> = [dec!(1), dec!(1), Decimal::MAX, Decimal::MAX]
            .into_iter()
            .map(listing)
            .collect();
        let snapshot = MarketSnapshot::from_listings(&listings).unwrap();
        assert_eq!(snapshot.count, 4);
        assert!(snapshot.median > dec!(1) && snapshot.median < Decimal::MAX);
    }
}
