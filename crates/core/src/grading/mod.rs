//! Score validation and letter-grade derivation for academic results.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::GradingError;
pub use service::GradingService;
pub use types::{Grade, GradedScores, ScoreSheet, Term};
