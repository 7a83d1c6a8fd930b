//! Class standings aggregation with tie-aware positions.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::RankingService;
pub use types::{RankedStudent, SubjectBreakdown, SubjectScore};
