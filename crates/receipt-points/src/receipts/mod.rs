//! Receipt scoring, identifier issuing, and the storage-backed service that ties them together.
//!
//! [`scoring`] is a pure function of the receipt; everything stateful lives behind
//! [`ReceiptRepository`] so the engine and issuer can be tested in isolation.

pub mod domain;
pub mod identifier;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Item, Points, PointsView, Receipt, ReceiptId, ReceiptIdView, ReceiptRecord};
pub use identifier::{issue, issue_with_rng, RECEIPT_ID_LENGTH};
pub use repository::{ReceiptRepository, RepositoryError};
pub use router::receipt_router;
pub use scoring::{
    score, score_breakdown, InvalidReceipt, ScoreBreakdown, ScoreComponent, ScoringRule,
};
pub use service::{ReceiptService, ReceiptServiceError};
