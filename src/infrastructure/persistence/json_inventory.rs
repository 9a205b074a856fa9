//! JSON file inventory store.
//!
//! The whole inventory lives in one `{"items": [...]}` document. Every
//! operation reloads the file, and writes go through a temp file followed by a
//! rename so a crash never leaves a truncated document behind.

use crate::domain::errors::InventoryError;
use crate::domain::inventory::Item;
use crate::domain::repositories::ItemRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(default)]
    pub items: Vec<Item>,
}

pub struct JsonFileItemRepository {
    file_path: PathBuf,
    // Serialises read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileItemRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the document. A missing file is an empty inventory.
    pub async fn load(&self) -> Result<InventoryDocument> {
        if !tokio::fs::try_exists(&self.file_path)
            .await
            .with_context(|| format!("Failed to stat {:?}", self.file_path))?
        {
            debug!("Inventory file {:?} missing, starting empty", self.file_path);
            return Ok(InventoryDocument::default());
        }

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .with_context(|| format!("Failed to read inventory file {:?}", self.file_path))?;
        let document: InventoryDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse inventory JSON {:?}", self.file_path))?;
        Ok(document)
    }

    async fn save(&self, document: &InventoryDocument) -> Result<()> {
        let content =
            serde_json::to_string_pretty(document).context("Failed to serialize inventory")?;

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create inventory directory")?;
        }

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .context("Failed to write temp file")?;
        tokio::fs::rename(&temp_path, &self.file_path)
            .await
            .context("Failed to rename temp file")?;

        debug!("Saved {} items to {:?}", document.items.len(), self.file_path);
        Ok(())
    }

    /// Writes the full inventory dump to `destination`.
    pub async fn export_to(&self, destination: &Path) -> Result<usize> {
        let document = self.load().await?;
        let content =
            serde_json::to_string_pretty(&document).context("Failed to serialize inventory")?;
        tokio::fs::write(destination, content)
            .await
            .with_context(|| format!("Failed to write export {:?}", destination))?;

        info!("Exported {} items to {:?}", document.items.len(), destination);
        Ok(document.items.len())
    }
}

#[async_trait]
impl ItemRepository for JsonFileItemRepository {
    async fn create(&self, item: &Item) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        if document.items.iter().any(|i| i.id() == item.id()) {
            return Err(InventoryError::Duplicate {
                id: item.id().to_string(),
            }
            .into());
        }
        document.items.push(item.clone());
        self.save(&document).await?;

        info!("Added item {} ({})", item.id(), item.name);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let document = self.load().await?;
        Ok(document.items.into_iter().find(|i| i.id() == id))
    }

    async fn update(&self, item: &Item) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let slot = document
            .items
            .iter_mut()
            .find(|i| i.id() == item.id())
            .ok_or_else(|| InventoryError::NotFound {
                id: item.id().to_string(),
            })?;
        item.ensure_supersedes(slot)?;
        *slot = item.clone();
        self.save(&document).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let before = document.items.len();
        document.items.retain(|i| i.id() != id);
        if document.items.len() == before {
            return Err(InventoryError::NotFound { id: id.to_string() }.into());
        }
        self.save(&document).await?;

        info!("Deleted item {}", id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.load().await?.items)
    }
}
