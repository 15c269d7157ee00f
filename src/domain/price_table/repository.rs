//! Price table repository interface

use async_trait::async_trait;

use super::model::PriceTable;
use crate::domain::DomainResult;

#[async_trait]
pub trait PriceTableRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PriceTable>>;
    async fn find_all(&self) -> DomainResult<Vec<PriceTable>>;
    /// Replace the whole local set with the freshly synced tables.
    async fn replace_all(&self, tables: Vec<PriceTable>) -> DomainResult<()>;
    async fn delete_all(&self) -> DomainResult<()>;
}
