use thiserror::Error;

use crate::record::RecordId;

/// Failures raised by resource store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record {id} not found")]
    NotFound { id: RecordId },

    #[error("duplicate record id {id}")]
    DuplicateId { id: RecordId },

    #[error("storage backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
