use crate::models::Business;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all business scrapers
/// This allows easy addition of new sources (Justdial, IndiaMART, etc) in the future
#[async_trait]
pub trait BusinessScraper: Send + Sync {
    /// Scrape businesses for one search query, up to `limit` results
    async fn scrape(&self, query: &str, limit: usize) -> Result<Vec<Business>>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
