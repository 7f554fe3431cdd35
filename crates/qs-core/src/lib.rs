//! qs-core: stable foundation for steamscope.
//!
//! Contains:
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{QsError, QsResult};
pub use numeric::*;
