//! In-Memory Repository Implementation
//!
//! Thread-safe, in-memory implementation of `domain::repositories::ItemRepository`.
//!
//! # Limitations
//!
//! - Data is lost on application restart
//! - Limited by available RAM
//!
//! For a store that survives restarts use `JsonFileItemRepository`.

use crate::domain::errors::InventoryError;
use crate::domain::inventory::Item;
use crate::domain::repositories::ItemRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ItemRepository
/// Suitable for testing and short-lived sessions
pub struct InMemoryItemRepository {
    items: Arc<RwLock<Vec<Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: &Item) -> Result<()> {
        let mut items = self.items.write().await;
        if items.iter().any(|i| i.id() == item.id()) {
            return Err(InventoryError::Duplicate {
                id: item.id().to_string(),
            }
            .into());
        }
        items.push(item.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id() == id).cloned())
    }

    async fn update(&self, item: &Item) -> Result<()> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|i| i.id() == item.id())
            .ok_or_else(|| InventoryError::NotFound {
                id: item.id().to_string(),
            })?;
        item.ensure_supersedes(slot)?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id() != id);
        if items.len() == before {
            return Err(InventoryError::NotFound { id: id.to_string() }.into());
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }
}
