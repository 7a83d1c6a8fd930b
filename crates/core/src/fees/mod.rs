//! Fee ledger accumulation and payment status derivation.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::FeeError;
pub use service::FeeService;
pub use types::{FeeResolution, LedgerUpdate, PaymentStatus};
