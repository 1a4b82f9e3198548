//! Repository Layer - Core Traits

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ContentRecord, DomainResult, RecordId, UserId};

/// Owner-scoped repository for content records.
///
/// Every read and write is filtered by the owning user; rows outside
/// that scope are invisible to the call.
#[async_trait]
pub trait RecordRepository<T: ContentRecord>: Send + Sync {
    /// Insert a new record (id 0); returns the stored record carrying
    /// the store-assigned id.
    async fn insert(&self, record: &T) -> DomainResult<T>;

    /// Every record owned by `owner`, in the type's load order.
    async fn list(&self, owner: UserId) -> DomainResult<Vec<T>>;

    /// Patch one record, scoped by id AND owner. Returns rows touched;
    /// an owner mismatch is a zero, not an error.
    async fn update(&self, owner: UserId, id: RecordId, patch: Value) -> DomainResult<u64>;

    /// Delete one record, scoped by id AND owner. Returns rows removed.
    async fn delete(&self, owner: UserId, id: RecordId) -> DomainResult<u64>;
}
