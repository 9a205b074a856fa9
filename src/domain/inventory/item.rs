use crate::domain::errors::{InventoryError, PricingError};
use crate::domain::market::Condition;
use crate::domain::pricing::engine::ensure_non_negative;
use crate::domain::pricing::{FeeEngine, Platform, Recommendation};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of an inventory item. Only moves forward; the declaration
/// order is the lifecycle order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Unlisted,
    Listed,
    Sold,
}

impl ItemStatus {
    /// The only status this one may move to
    pub fn next(&self) -> Option<ItemStatus> {
        match self {
            ItemStatus::Unlisted => Some(ItemStatus::Listed),
            ItemStatus::Listed => Some(ItemStatus::Sold),
            ItemStatus::Sold => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStatus::Unlisted => "unlisted",
            ItemStatus::Listed => "listed",
            ItemStatus::Sold => "sold",
        };
        f.pad(name)
    }
}

impl FromStr for ItemStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unlisted" => Ok(ItemStatus::Unlisted),
            "listed" => Ok(ItemStatus::Listed),
            "sold" => Ok(ItemStatus::Sold),
            _ => anyhow::bail!(
                "Invalid status: {}. Must be 'unlisted', 'listed', or 'sold'",
                s
            ),
        }
    }
}

/// An item held for resale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub measurements: String,
    #[serde(default)]
    pub notes: String,
    cost_basis: Option<Decimal>,
    list_price: Decimal,
    /// Lowest price the seller will accept
    #[serde(default)]
    floor_price: Option<Decimal>,
    /// Price the seller hopes to get
    #[serde(default)]
    target_price: Option<Decimal>,
    status: ItemStatus,
    #[serde(default)]
    listed_on: Vec<Platform>,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Creates an unlisted item with a fresh 8-character identifier.
    pub fn new(
        name: impl Into<String>,
        list_price: Decimal,
        cost_basis: Option<Decimal>,
    ) -> Result<Self, PricingError> {
        ensure_non_negative("list_price", list_price)?;
        if let Some(cost) = cost_basis {
            ensure_non_negative("cost_basis", cost)?;
        }

        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);

        Ok(Self {
            id,
            name: name.into(),
            brand: String::new(),
            category: String::new(),
            condition: Condition::default(),
            color: String::new(),
            size: String::new(),
            measurements: String::new(),
            notes: String::new(),
            cost_basis,
            list_price,
            floor_price: None,
            target_price: None,
            status: ItemStatus::Unlisted,
            listed_on: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cost_basis(&self) -> Option<Decimal> {
        self.cost_basis
    }

    pub fn list_price(&self) -> Decimal {
        self.list_price
    }

    pub fn floor_price(&self) -> Option<Decimal> {
        self.floor_price
    }

    pub fn target_price(&self) -> Option<Decimal> {
        self.target_price
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn listed_on(&self) -> &[Platform] {
        &self.listed_on
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_list_price(&mut self, price: Decimal) -> Result<(), PricingError> {
        ensure_non_negative("list_price", price)?;
        self.list_price = price;
        Ok(())
    }

    pub fn set_cost_basis(&mut self, cost: Option<Decimal>) -> Result<(), PricingError> {
        if let Some(cost) = cost {
            ensure_non_negative("cost_basis", cost)?;
        }
        self.cost_basis = cost;
        Ok(())
    }

    pub fn set_floor_price(&mut self, floor: Option<Decimal>) -> Result<(), PricingError> {
        if let Some(floor) = floor {
            ensure_non_negative("floor_price", floor)?;
        }
        self.floor_price = floor;
        Ok(())
    }

    pub fn set_target_price(&mut self, target: Option<Decimal>) -> Result<(), PricingError> {
        if let Some(target) = target {
            ensure_non_negative("target_price", target)?;
        }
        self.target_price = target;
        Ok(())
    }

    /// Moves the item one step forward in its lifecycle.
    pub fn transition_to(&mut self, status: ItemStatus) -> Result<(), InventoryError> {
        if self.status.next() != Some(status) {
            return Err(InventoryError::InvalidTransition {
                id: self.id.clone(),
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        Ok(())
    }

    /// Lists the item on `platform`. An already listed item can be
    /// cross-listed on further platforms.
    pub fn list_on(&mut self, platform: Platform) -> Result<(), InventoryError> {
        match self.status {
            ItemStatus::Unlisted => self.transition_to(ItemStatus::Listed)?,
            ItemStatus::Listed => {}
            ItemStatus::Sold => {
                return Err(InventoryError::InvalidTransition {
                    id: self.id.clone(),
                    from: self.status.to_string(),
                    to: ItemStatus::Listed.to_string(),
                });
            }
        }
        if !self.listed_on.contains(&platform) {
            self.listed_on.push(platform);
        }
        Ok(())
    }

    pub fn mark_sold(&mut self) -> Result<(), InventoryError> {
        self.transition_to(ItemStatus::Sold)
    }

    /// Checks that this copy may overwrite `stored`, the persisted record with
    /// the same id. A copy whose status lags behind the stored one is stale.
    pub fn ensure_supersedes(&self, stored: &Item) -> Result<(), InventoryError> {
        if self.status < stored.status {
            return Err(InventoryError::InvalidTransition {
                id: self.id.clone(),
                from: stored.status.to_string(),
                to: self.status.to_string(),
            });
        }
        Ok(())
    }

    /// Platform recommendation at the current list price and cost basis.
    pub fn quote_listing(&self, engine: &FeeEngine) -> Result<Recommendation, PricingError> {
        engine.recommend_best(self.list_price, self.cost_basis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn boots() -> Item {
        Item::new("Platform heel boots", dec!(85), Some(dec!(30))).unwrap()
    }

    #[test]
    fn test_new_item_defaults() {
        let item = boots();
        assert_eq!(item.id().len(), 8);
        assert!(item.id().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(item.status(), ItemStatus::Unlisted);
        assert!(item.listed_on().is_empty());
    }

    #[test]
    fn test_identifiers_are_unique() {
        assert_ne!(boots().id(), boots().id());
    }

    #[test]
    fn test_new_item_rejects_negative_amounts() {
        assert!(Item::new("x", dec!(-1), None).is_err());
        assert!(Item::new("x", dec!(1), Some(dec!(-1))).is_err());
    }

    #[test]
    fn test_forward_transitions() {
        let mut item = boots();
        item.list_on(Platform::Poshmark).unwrap();
        item.list_on(Platform::Ebay).unwrap();
        item.list_on(Platform::Poshmark).unwrap();
        assert_eq!(item.status(), ItemStatus::Listed);
        assert_eq!(item.listed_on(), &[Platform::Poshmark, Platform::Ebay]);

        item.mark_sold().unwrap();
        assert_eq!(item.status(), ItemStatus::Sold);
    }

    #[test]
    fn test_cannot_sell_unlisted_item() {
        let mut item = boots();
        let err = item.mark_sold().unwrap_err();
        assert!(matches!(err, InventoryError::InvalidTransition { .. }));
        assert_eq!(item.status(), ItemStatus::Unlisted);
    }

    #[test]
    fn test_no_back_transitions() {
        let mut item = boots();
        item.list_on(Platform::Depop).unwrap();
        item.mark_sold().unwrap();

        assert!(item.list_on(Platform::Mercari).is_err());
        assert!(item.transition_to(ItemStatus::Unlisted).is_err());
        assert!(item.transition_to(ItemStatus::Sold).is_err());
    }

    #[test]
    fn test_stale_copy_does_not_supersede() {
        let stale = boots();
        let mut current = stale.clone();
        current.list_on(Platform::Depop).unwrap();

        assert!(current.ensure_supersedes(&stale).is_ok());
        assert!(current.ensure_supersedes(&current).is_ok());
        let err = stale.ensure_supersedes(&current).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid status transition for {}: listed -> unlisted", stale.id())
        );
    }

    #[test]
    fn test_quote_listing_uses_cost_floor() {
        let mut item = boots();
        item.set_list_price(dec!(20)).unwrap();
        item.set_cost_basis(Some(dec!(50))).unwrap();

        let rec = item.quote_listing(&FeeEngine::default()).unwrap();
        assert!(rec.all_below_floor);
    }

    #[test]
    fn test_seller_prices_validated() {
        let mut item = boots();
        item.set_floor_price(Some(dec!(60))).unwrap();
        item.set_target_price(Some(dec!(95))).unwrap();
        assert_eq!(item.floor_price(), Some(dec!(60)));
        assert_eq!(item.target_price(), Some(dec!(95)));

        assert!(item.set_floor_price(Some(dec!(-1))).is_err());
        assert_eq!(item.floor_price(), Some(dec!(60)));
        item.set_target_price(None).unwrap();
        assert_eq!(item.target_price(), None);
    }

    #[test]
    fn test_older_records_load_without_new_fields() {
        let json = r#"{
            "id": "ab12cd34",
            "name": "Denim jacket",
            "cost_basis": null,
            "list_price": "40",
            "status": "listed",
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id(), "ab12cd34");
        assert!(item.color.is_empty());
        assert_eq!(item.floor_price(), None);
        assert_eq!(item.status(), ItemStatus::Listed);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ItemStatus::from_str("Listed").unwrap(), ItemStatus::Listed);
        assert!(ItemStatus::from_str("archived").is_err());
    }
}
