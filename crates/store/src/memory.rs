use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::record::{Record, RecordId, ResourceStore};

/// How [`MemoryStore`] picks the id of a newly created record
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// `max(existing ids) + 1`, or 1 when empty
    #[default]
    MaxPlusOne,
    /// `last.id + 1`, or 1 when empty. Reuses the id of a deleted trailing record.
    LastPlusOne,
}

impl IdPolicy {
    fn next_id<R: Record>(self, records: &[R]) -> RecordId {
        match self {
            IdPolicy::MaxPlusOne => records.iter().map(Record::id).max().unwrap_or(0) + 1,
            IdPolicy::LastPlusOne => records.last().map(Record::id).unwrap_or(0) + 1,
        }
    }
}

/// In-process [`ResourceStore`] keeping records in insertion order.
///
/// Share it between handlers behind an `Arc`; the inner lock serializes writers so the
/// id-uniqueness invariant holds under concurrent requests.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
    policy: IdPolicy,
}

impl<R: Record> MemoryStore<R> {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            policy,
        }
    }

    /// Build a store pre-populated with `records`, kept in the given order.
    pub fn with_records(policy: IdPolicy, records: Vec<R>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StoreError::DuplicateId { id: record.id() });
            }
        }

        Ok(Self {
            records: RwLock::new(records),
            policy,
        })
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}

#[async_trait]
impl<R: Record> ResourceStore<R> for MemoryStore<R> {
    async fn list_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, id: RecordId) -> Result<R, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(StoreError::not_found(id))
    }

    async fn find_by<P>(&self, predicate: P) -> Result<Vec<R>, StoreError>
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    async fn create(&self, fields: R::Fields) -> Result<R, StoreError> {
        let mut records = self.records.write().await;
        let id = self.policy.next_id(&records);
        if records.iter().any(|record| record.id() == id) {
            return Err(StoreError::DuplicateId { id });
        }

        let record = R::from_fields(id, fields);
        records.push(record.clone());
        tracing::debug!(id, "record created");

        Ok(record)
    }

    async fn replace(&self, id: RecordId, fields: R::Fields) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(StoreError::not_found(id))?;

        *slot = R::from_fields(id, fields);
        tracing::debug!(id, "record replaced");

        Ok(())
    }

    async fn update_fields(&self, id: RecordId, fields: R::Fields) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(StoreError::not_found(id))?;

        record.apply_fields(fields);
        tracing::debug!(id, "record updated");

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(StoreError::not_found(id))?;

        records.remove(position);
        tracing::debug!(id, "record deleted");

        Ok(())
    }
}
