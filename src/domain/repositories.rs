//! Repository Pattern Abstractions
//!
//! The inventory store is a collaborator of the pricing logic: a key-value
//! record store keyed by item identifier. Business code only sees the
//! [`ItemRepository`] trait; backends live in `infrastructure`.
//!
//! # Example
//!
//! ```rust,no_run
//! use resale_pricing::domain::inventory::Item;
//! use resale_pricing::domain::repositories::ItemRepository;
//! use resale_pricing::infrastructure::InMemoryItemRepository;
//! use rust_decimal_macros::dec;
//!
//! # async {
//! let repo = InMemoryItemRepository::new();
//! let item = Item::new("Levi's 501", dec!(45), Some(dec!(8))).unwrap();
//! repo.create(&item).await.unwrap();
//! let all = repo.list().await.unwrap();
//! # };
//! ```

use crate::domain::inventory::Item;
use anyhow::Result;
use async_trait::async_trait;

/// Storage for inventory items.
///
/// `update` and `delete` of an unknown identifier fail with
/// `InventoryError::NotFound`; `create` of an existing identifier fails with
/// `InventoryError::Duplicate`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, item: &Item) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<Item>>;

    async fn update(&self, item: &Item) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Every stored item in insertion order
    async fn list(&self) -> Result<Vec<Item>>;
}
