use async_trait::async_trait;

use crate::error::StoreError;

/// Identifier of a stored record. Always positive once assigned.
pub type RecordId = i64;

/// A typed record that can live in a [`ResourceStore`]
pub trait Record: Clone + Send + Sync + 'static {
    /// Validated field set without an id, as supplied by create and update requests
    type Fields: Clone + Send + Sync + 'static;

    fn id(&self) -> RecordId;

    /// Build a full record from an assigned id and its fields
    fn from_fields(id: RecordId, fields: Self::Fields) -> Self;

    /// Overwrite the mutable fields in place, keeping the record's identity
    fn apply_fields(&mut self, fields: Self::Fields);
}

/// CRUD contract over an id-keyed collection of records.
///
/// Ids are unique within a store at all times and a lookup by id yields at most one record.
/// Every operation is atomic from the caller's perspective.
#[async_trait]
pub trait ResourceStore<R: Record>: Send + Sync + 'static {
    /// Every record in storage order
    async fn list_all(&self) -> Result<Vec<R>, StoreError>;

    /// The record with `id`, or [`StoreError::NotFound`]
    async fn get_by_id(&self, id: RecordId) -> Result<R, StoreError>;

    /// Every record matching `predicate`, in storage order
    async fn find_by<P>(&self, predicate: P) -> Result<Vec<R>, StoreError>
    where
        P: Fn(&R) -> bool + Send + Sync + 'static;

    /// Insert a record under a freshly assigned id and return it as stored
    async fn create(&self, fields: R::Fields) -> Result<R, StoreError>;

    /// Replace the whole record stored under `id`
    async fn replace(&self, id: RecordId, fields: R::Fields) -> Result<(), StoreError>;

    /// Overwrite the mutable fields of the record stored under `id`
    async fn update_fields(&self, id: RecordId, fields: R::Fields) -> Result<(), StoreError>;

    /// Remove the record stored under `id`
    async fn delete(&self, id: RecordId) -> Result<(), StoreError>;
}
