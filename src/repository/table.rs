//! Generic table-backed repository
//!
//! One implementation covers all three content tables; the record type
//! supplies the table name, load order and row mapping.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ContentRecord, DomainError, DomainResult, RecordId, UserId};
use crate::store::{DataStore, Filter};

use super::traits::RecordRepository;

pub struct TableRepository<T: ContentRecord> {
    store: Arc<dyn DataStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T: ContentRecord> TableRepository<T> {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    fn scope(owner: UserId, id: RecordId) -> [Filter; 2] {
        [Filter::eq("id", id), Filter::eq("user_id", owner)]
    }
}

#[async_trait]
impl<T: ContentRecord> RecordRepository<T> for TableRepository<T> {
    async fn insert(&self, record: &T) -> DomainResult<T> {
        let mut row =
            serde_json::to_value(record).map_err(|e| DomainError::Internal(e.to_string()))?;
        if let Some(obj) = row.as_object_mut() {
            // The store assigns the id
            obj.remove("id");
        }
        let stored = self.store.insert(T::TABLE, row).await?;
        serde_json::from_value(stored).map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self, owner: UserId) -> DomainResult<Vec<T>> {
        let rows = self
            .store
            .select(T::TABLE, &[Filter::eq("user_id", owner)], T::load_order())
            .await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| DomainError::Internal(e.to_string()))
            })
            .collect()
    }

    async fn update(&self, owner: UserId, id: RecordId, patch: Value) -> DomainResult<u64> {
        self.store
            .update(T::TABLE, &Self::scope(owner, id), patch)
            .await
    }

    async fn delete(&self, owner: UserId, id: RecordId) -> DomainResult<u64> {
        self.store.delete(T::TABLE, &Self::scope(owner, id)).await
    }
}
