use thiserror::Error;

use crate::domain::RecordId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record index {index} is out of range for a store of {len} records")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("record {id} being edited is no longer in the store")]
    EditTargetMissing { id: RecordId },
    #[error("local storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode records: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Errors caused by the caller passing a stale or bogus position rather
    /// than by the storage backend.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            StoreError::IndexOutOfRange { .. } | StoreError::EditTargetMissing { .. }
        )
    }
}
