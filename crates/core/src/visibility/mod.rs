//! Role-based visibility scope resolution.
//!
//! Every query entry point used to branch on the caller's role string.
//! Instead, a principal resolves once to a [`VisibilityScope`] capability
//! descriptor that repositories apply uniformly.

pub mod scope;

pub use scope::{Principal, Role, VisibilityScope};
