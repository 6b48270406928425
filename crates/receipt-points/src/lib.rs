//! Reward points for purchase receipts: a pure scoring engine, an identifier issuer, and the
//! service, repository, and HTTP router that store scored receipts for later lookup.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
