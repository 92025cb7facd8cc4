pub mod auth;
pub mod sheets;

use crate::error::Result;
use crate::types::row::ResultRow;
use async_trait::async_trait;

/// Destination for a completed result row.
#[async_trait]
pub trait RowSink: Send + Sync {
    async fn append(&self, row: &ResultRow) -> Result<()>;
}
