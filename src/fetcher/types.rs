use crate::error::Result;
use crate::record::ZoneSnapshot;

use async_trait::async_trait;

/// Pulls one full snapshot of `domain` from the upstream server.
/// A single attempt per invocation; retrying is the caller's business.
#[async_trait]
pub trait ZoneFetcher: Send + Sync {
    async fn fetch(&self, server: &str, domain: &str) -> Result<ZoneSnapshot>;
}
