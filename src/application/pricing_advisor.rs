//! Pricing advice for a single item.
//!
//! Combines a price estimate (live comparables, retail-based, or a default
//! range), the cost-basis floor, per-platform profit breakdowns and the fee
//! engine's platform recommendation into one report.

use crate::domain::errors::PricingError;
use crate::domain::inventory::Item;
use crate::domain::market::{Condition, MarketSnapshot, PricePoints, estimate_from_retail};
use crate::domain::ports::ComparableSource;
use crate::domain::pricing::engine::ensure_non_negative;
use crate::domain::pricing::{FeeEngine, Platform, PlatformQuote, Recommendation, round_currency};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Suggested prices are raised to at least cost basis times this
pub const DEFAULT_MIN_MARKUP: Decimal = dec!(1.10);

const DEFAULT_PRICE_POINTS: PricePoints = PricePoints {
    quick_sale: dec!(25.00),
    fair_price: dec!(50.00),
    max_value: dec!(75.00),
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub item_name: String,
    pub brand: Option<String>,
    pub condition: Condition,
    pub retail_price: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    /// Seller's own minimum asking price
    #[serde(default)]
    pub floor_price: Option<Decimal>,
}

impl PricingRequest {
    /// Request for a stored inventory item. The retail price is not kept on
    /// the record, so callers add it when they know it.
    pub fn for_item(item: &Item) -> Self {
        Self {
            item_name: item.name.clone(),
            brand: Some(item.brand.clone()).filter(|brand| !brand.trim().is_empty()),
            condition: item.condition,
            retail_price: None,
            cost_basis: item.cost_basis(),
            floor_price: item.floor_price(),
        }
    }

    /// Search query sent to the comparable source
    pub fn search_query(&self) -> String {
        match &self.brand {
            Some(brand) if !brand.trim().is_empty() => {
                format!("{} {}", brand.trim(), self.item_name.trim())
            }
            _ => self.item_name.trim().to_string(),
        }
    }
}

/// Where the suggested prices came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PriceSource {
    Market { count: usize },
    Retail,
    Default,
}

/// Outcome of selling at one price on one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLine {
    pub sale_price: Decimal,
    pub platform_fee: Decimal,
    pub net_payout: Decimal,
    pub profit: Decimal,
    pub profit_margin_pct: Decimal,
}

impl ProfitLine {
    fn from_quote(quote: &PlatformQuote, cost_basis: Option<Decimal>) -> Self {
        Self {
            sale_price: quote.gross_price,
            platform_fee: quote.fee,
            net_payout: quote.net_proceeds,
            profit: quote.profit(cost_basis),
            profit_margin_pct: quote.profit_margin_pct(cost_basis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    pub platform: Platform,
    pub quick_sale: ProfitLine,
    pub fair_price: ProfitLine,
    pub max_value: ProfitLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingAdvice {
    pub item_name: String,
    pub condition: Condition,
    pub source: PriceSource,
    pub market: Option<MarketSnapshot>,
    pub price_points: PricePoints,
    /// One entry per platform, in platform enumeration order
    pub breakdown: Vec<PlatformBreakdown>,
    /// Platforms ranked at the fair price
    pub recommendation: Recommendation,
    pub tip: String,
}

pub struct PricingAdvisor {
    engine: FeeEngine,
    comparables: Arc<dyn ComparableSource>,
    min_markup: Decimal,
}

impl PricingAdvisor {
    pub fn new(engine: FeeEngine, comparables: Arc<dyn ComparableSource>) -> Self {
        Self {
            engine,
            comparables,
            min_markup: DEFAULT_MIN_MARKUP,
        }
    }

    pub fn with_min_markup(mut self, min_markup: Decimal) -> Self {
        self.min_markup = min_markup;
        self
    }

    pub async fn advise(&self, request: &PricingRequest) -> Result<PricingAdvice> {
        if let Some(cost) = request.cost_basis {
            ensure_non_negative("cost_basis", cost)?;
        }
        if let Some(floor) = request.floor_price {
            ensure_non_negative("floor_price", floor)?;
        }

        let (source, market, points) = self.estimate(request).await?;
        let points = self.apply_floor(points, request.cost_basis, request.floor_price)?;

        let breakdown = self
            .breakdown(&points, request.cost_basis)
            .context("Failed to compute platform breakdown")?;
        let recommendation = self
            .engine
            .recommend_best(points.fair_price, request.cost_basis)?;
        let tip = build_tip(&points, &recommendation);

        info!(
            "Priced '{}' from {:?}: fair ${}, quick ${}",
            request.item_name, source, points.fair_price, points.quick_sale
        );

        Ok(PricingAdvice {
            item_name: request.item_name.clone(),
            condition: request.condition,
            source,
            market,
            price_points: points,
            breakdown,
            recommendation,
            tip,
        })
    }

    async fn estimate(
        &self,
        request: &PricingRequest,
    ) -> Result<(PriceSource, Option<MarketSnapshot>, PricePoints)> {
        let query = request.search_query();
        let listings = match self.comparables.find_comparables(&query).await {
            Ok(listings) => listings,
            Err(e) => {
                warn!("Comparable search failed for '{}': {:#}", query, e);
                Vec::new()
            }
        };

        if let Some(snapshot) = MarketSnapshot::from_listings(&listings) {
            let points = snapshot.price_points;
            return Ok((
                PriceSource::Market {
                    count: snapshot.count,
                },
                Some(snapshot),
                points,
            ));
        }

        if let Some(retail) = request.retail_price {
            let range = estimate_from_retail(retail, request.condition)?;
            return Ok((PriceSource::Retail, None, range.into()));
        }

        Ok((PriceSource::Default, None, DEFAULT_PRICE_POINTS))
    }

    /// Raises quick-sale and fair price to the higher of the marked-up cost
    /// basis and the seller's floor price.
    fn apply_floor(
        &self,
        points: PricePoints,
        cost_basis: Option<Decimal>,
        floor_price: Option<Decimal>,
    ) -> Result<PricePoints, PricingError> {
        let cost_floor = match cost_basis {
            Some(cost) => Some(
                cost.checked_mul(self.min_markup)
                    .map(round_currency)
                    .ok_or(PricingError::Overflow {
                        field: "cost_basis",
                        value: cost,
                    })?,
            ),
            None => None,
        };
        let Some(floor) = cost_floor.max(floor_price) else {
            return Ok(points);
        };

        let quick_sale = points.quick_sale.max(floor);
        let fair_price = points.fair_price.max(floor);
        Ok(PricePoints {
            quick_sale,
            fair_price,
            max_value: points.max_value.max(fair_price),
        })
    }

    fn breakdown(
        &self,
        points: &PricePoints,
        cost_basis: Option<Decimal>,
    ) -> Result<Vec<PlatformBreakdown>> {
        let line = |platform: Platform, price: Decimal| -> Result<ProfitLine> {
            let quote = self.engine.compute_quote(platform, price)?;
            Ok(ProfitLine::from_quote(&quote, cost_basis))
        };

        Platform::ALL
            .iter()
            .map(|platform| {
                Ok(PlatformBreakdown {
                    platform: *platform,
                    quick_sale: line(*platform, points.quick_sale)?,
                    fair_price: line(*platform, points.fair_price)?,
                    max_value: line(*platform, points.max_value)?,
                })
            })
            .collect()
    }
}

fn build_tip(points: &PricePoints, recommendation: &Recommendation) -> String {
    let mut tip = String::new();
    if recommendation.all_below_floor
        && let Some(cost) = recommendation.cost_basis
    {
        tip.push_str(&format!(
            "Warning: every platform nets less than your ${:.2} cost at ${:.2}. ",
            cost, points.fair_price
        ));
    }
    tip.push_str(&format!(
        "List at ${:.2} for fair value, or ${:.2} for quick sale",
        points.fair_price, points.quick_sale
    ));
    if let Some(best) = recommendation.best() {
        tip.push_str(&format!(
            ". Best payout: {} (${:.2} net)",
            best.platform.display_name(),
            best.net_proceeds
        ));
    }
    tip
}
