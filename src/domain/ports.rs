use crate::domain::market::ComparableListing;
use anyhow::Result;
use async_trait::async_trait;

/// Provider of comparable sold listings (sold-listing search, reverse image
/// search). Treated as a black box.
#[async_trait]
pub trait ComparableSource: Send + Sync {
    async fn find_comparables(&self, query: &str) -> Result<Vec<ComparableListing>>;
}
