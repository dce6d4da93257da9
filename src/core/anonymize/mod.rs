//! Anonymization stage (pipeline stage 4)
//!
//! Consumes the three persisted maps read-only and produces the anonymized
//! output tree. See [`engine::Anonymizer`] for the per-file pipeline.

pub mod dates;
pub mod engine;
pub mod filename;
pub mod summary;
pub mod warnings;

// Re-export main types
pub use engine::Anonymizer;
pub use summary::RunSummary;
pub use warnings::WarningSink;
