use async_trait::async_trait;

use crate::changeset::ChangeDescriptor;
use crate::error::Result;

/// One change-batch request against the hosting API. The API applies a
/// batch fully or rejects it fully; that semantics passes through
/// unchanged, so a returned error means nothing in `changes` was applied.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn submit(&self, hosted_zone: &str, changes: &[ChangeDescriptor]) -> Result<()>;
}
