use crate::domain::market::ComparableListing;
use crate::domain::ports::ComparableSource;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Comparable-sales source backed by canned listings, keyed by
/// lowercase query. Unknown queries return no listings.
#[derive(Clone, Default)]
pub struct MockComparableSource {
    listings: Arc<RwLock<HashMap<String, Vec<ComparableListing>>>>,
}

impl MockComparableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_listings(&self, query: &str, listings: Vec<ComparableListing>) {
        self.listings
            .write()
            .await
            .insert(query.trim().to_lowercase(), listings);
    }
}

#[async_trait]
impl ComparableSource for MockComparableSource {
    async fn find_comparables(&self, query: &str) -> Result<Vec<ComparableListing>> {
        let listings = self.listings.read().await;
        Ok(listings
            .get(&query.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

/// Source that always fails, for exercising fallback paths
#[derive(Clone, Default)]
pub struct UnavailableComparableSource;

#[async_trait]
impl ComparableSource for UnavailableComparableSource {
    async fn find_comparables(&self, query: &str) -> Result<Vec<ComparableListing>> {
        anyhow::bail!("comparable search unavailable for '{}'", query)
    }
}

/// Source for runs without any comparable-sales provider configured
#[derive(Clone, Default)]
pub struct NoComparables;

#[async_trait]
impl ComparableSource for NoComparables {
    async fn find_comparables(&self, _query: &str) -> Result<Vec<ComparableListing>> {
        Ok(Vec::new())
    }
}
