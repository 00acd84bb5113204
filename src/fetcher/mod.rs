pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// One page request against the upstream launch listing.
#[async_trait]
pub trait LaunchFetcher {
    /// Returns the raw response body; network failures and non-2xx
    /// statuses are errors.
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<u8>>;
}
