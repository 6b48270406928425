use super::domain::{ReceiptId, ReceiptRecord};

/// Storage abstraction so the service can be exercised without a concrete backend.
///
/// `insert` must refuse to replace an existing identifier.
pub trait ReceiptRepository: Send + Sync {
    fn insert(&self, record: ReceiptRecord) -> Result<ReceiptRecord, RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
