//! Console rendering for quotes, recommendations and pricing advice.

use crate::application::pricing_advisor::{PriceSource, PricingAdvice};
use crate::domain::inventory::Item;
use crate::domain::listing::ListingDescriptions;
use crate::domain::pricing::{Platform, PlatformQuote, Recommendation};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

/// Renders engine output as plain-text tables.
#[derive(Debug, Default)]
pub struct QuoteReporter;

impl QuoteReporter {
    pub fn quotes_table(&self, quotes: &[PlatformQuote]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<4} | {:<12} | {:>10} | {:>8} | {:>10} | {:<5}",
            "#", "Platform", "Price", "Fee", "Net", "Loss"
        );
        let _ = writeln!(out, "{}", "-".repeat(62));
        for (i, quote) in quotes.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<4} | {:<12} | {:>10.2} | {:>8.2} | {:>10.2} | {:<5}",
                i + 1,
                quote.platform.display_name(),
                quote.gross_price,
                quote.fee,
                quote.net_proceeds,
                if quote.below_floor { "yes" } else { "" }
            );
        }
        out
    }

    pub fn recommendation(&self, recommendation: &Recommendation) -> String {
        let mut out = self.quotes_table(&recommendation.quotes);
        match (recommendation.best(), recommendation.all_below_floor) {
            (Some(best), true) => {
                let _ = writeln!(
                    out,
                    "\n⚠️  Every platform sells at a loss. Least bad: {} (${:.2} short)",
                    best.platform.display_name(),
                    recommendation.shortfall().unwrap_or_default()
                );
            }
            (Some(best), false) => {
                let _ = writeln!(
                    out,
                    "\n🏆 Best platform: {} (${:.2} net)",
                    best.platform.display_name(),
                    best.net_proceeds
                );
            }
            (None, _) => {}
        }
        out
    }

    pub fn advice(&self, advice: &PricingAdvice) -> String {
        let mut out = String::new();
        let source = match advice.source {
            PriceSource::Market { count } => format!("live ({} sold listings)", count),
            PriceSource::Retail => "estimated from retail".to_string(),
            PriceSource::Default => "default estimate".to_string(),
        };

        let _ = writeln!(out, "{} ({} condition)", advice.item_name, advice.condition);
        let _ = writeln!(out, "Data source: {}", source);
        let _ = writeln!(out, "\n📊 Recommended prices:");
        let _ = writeln!(out, "  Quick sale: ${:.2}", advice.price_points.quick_sale);
        let _ = writeln!(out, "  Fair price: ${:.2}", advice.price_points.fair_price);
        let _ = writeln!(out, "  Max value:  ${:.2}", advice.price_points.max_value);

        let _ = writeln!(out, "\n💰 Net at fair price by platform:");
        for entry in &advice.breakdown {
            let line = &entry.fair_price;
            let _ = writeln!(
                out,
                "  {:<12} ${:>8.2} payout, ${:>8.2} profit ({}%)",
                entry.platform.display_name(),
                line.net_payout,
                line.profit,
                line.profit_margin_pct
            );
        }

        let _ = writeln!(out, "\n{}", advice.tip);
        out
    }

    pub fn items_table(&self, items: &[Item]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<8} | {:<28} | {:>9} | {:>9} | {:<8}",
            "ID", "Name", "Cost", "Price", "Status"
        );
        let _ = writeln!(out, "{}", "-".repeat(72));
        for item in items {
            let cost = item
                .cost_basis()
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{:<8} | {:<28} | {:>9} | {:>9.2} | {:<8}",
                item.id(),
                truncate(&item.name, 28),
                cost,
                item.list_price(),
                item.status()
            );
        }
        out
    }

    /// Every field of one item, one per line. Blank fields are skipped.
    pub fn item_details(&self, item: &Item) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", item.name, item.id());
        let text_fields = [
            ("Brand", item.brand.as_str()),
            ("Category", item.category.as_str()),
            ("Color", item.color.as_str()),
            ("Size", item.size.as_str()),
            ("Measurements", item.measurements.as_str()),
        ];
        for (label, value) in text_fields {
            if !value.trim().is_empty() {
                let _ = writeln!(out, "  {:<13} {}", format!("{}:", label), value.trim());
            }
        }
        let _ = writeln!(out, "  {:<13} {}", "Condition:", item.condition);
        let _ = writeln!(out, "  {:<13} {}", "Status:", item.status());
        if !item.listed_on().is_empty() {
            let platforms: Vec<_> = item.listed_on().iter().map(|p| p.display_name()).collect();
            let _ = writeln!(out, "  {:<13} {}", "Listed on:", platforms.join(", "));
        }

        let _ = writeln!(out, "  {:<13} ${:.2}", "List price:", item.list_price());
        let prices = [
            ("Cost:", item.cost_basis()),
            ("Floor:", item.floor_price()),
            ("Target:", item.target_price()),
        ];
        for (label, amount) in prices {
            if let Some(amount) = amount {
                let _ = writeln!(out, "  {:<13} ${:.2}", label, amount);
            }
        }
        if let (Some(target), Some(cost)) = (item.target_price(), item.cost_basis())
            && target < cost
        {
            let _ = writeln!(out, "  ⚠️  Target is below cost by ${:.2}", cost - target);
        }

        let _ = writeln!(
            out,
            "  {:<13} {}",
            "Added:",
            item.created_at().format("%Y-%m-%d %H:%M UTC")
        );
        if !item.notes.trim().is_empty() {
            let _ = writeln!(out, "\n{}", item.notes.trim());
        }
        out
    }

    /// Listing copy for one platform, or the title plus every platform.
    pub fn descriptions(
        &self,
        descriptions: &ListingDescriptions,
        platform: Option<Platform>,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Title: {}", descriptions.title);
        let sections: Vec<(&str, &str)> = match platform {
            Some(platform) => vec![(
                platform.display_name(),
                descriptions.for_platform(platform),
            )],
            None => Platform::ALL
                .iter()
                .map(|p| (p.display_name(), descriptions.for_platform(*p)))
                .chain(std::iter::once(("Generic", descriptions.generic.as_str())))
                .collect(),
        };
        for (name, text) in sections {
            let _ = writeln!(out, "\n--- {} ---\n{}", name, text.trim_end());
        }
        out
    }

    pub fn json<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).context("Failed to serialize output")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
