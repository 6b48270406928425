use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{Points, Receipt, ReceiptId, ReceiptRecord};
use super::identifier;
use super::repository::{ReceiptRepository, RepositoryError};
use super::scoring::{self, InvalidReceipt};

/// Service composing the scoring engine, identifier issuer, and repository.
pub struct ReceiptService<R> {
    repository: Arc<R>,
}

impl<R> ReceiptService<R>
where
    R: ReceiptRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Score a receipt and store it under a newly issued identifier. Invalid receipts are
    /// never stored.
    pub fn process(&self, receipt: Receipt) -> Result<ReceiptRecord, ReceiptServiceError> {
        let points = match scoring::score(&receipt) {
            Ok(points) => points,
            Err(err) => {
                warn!(retailer = %receipt.retailer, "rejected unparseable receipt");
                return Err(err.into());
            }
        };

        // A failed lookup is treated as free; `insert` still rejects a real collision.
        let id = identifier::issue(|candidate| {
            matches!(self.repository.fetch(candidate), Ok(Some(_)))
        });

        let record = ReceiptRecord {
            id,
            receipt,
            points,
            processed_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(id = %stored.id, points = %stored.points, "receipt processed");
        Ok(stored)
    }

    /// Points previously awarded to the receipt stored under `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<Points, ReceiptServiceError> {
        self.get(id).map(|record| record.points)
    }

    /// Fetch a stored receipt record.
    pub fn get(&self, id: &ReceiptId) -> Result<ReceiptRecord, ReceiptServiceError> {
        debug!(%id, "looking up receipt");
        self.repository
            .fetch(id)?
            .ok_or_else(|| ReceiptServiceError::NotFound(id.clone()))
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Invalid(#[from] InvalidReceipt),
    #[error("Requested receipt id {0} was not found in the stored processed receipts")]
    NotFound(ReceiptId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
