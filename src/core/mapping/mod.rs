//! Pseudonym and offset map construction
//!
//! The three map-building stages of the pipeline, strictly ordered: the
//! subject map derives codes from the site map, and the anonymization stage
//! consumes all three. Each stage's entry point is a pure function over
//! fully materialized inputs; persistence happens in the command layer via
//! [`crate::adapters::mapstore::MapStore`].

pub mod codegen;
pub mod dates;
pub mod site;
pub mod subject;

// Re-export main entry points
pub use codegen::{IdGenerator, ADDON_OFFSETS, MAX_CODE_ATTEMPTS};
pub use dates::build_date_offset_map;
pub use site::{build_site_map, collect_sites};
pub use subject::{build_subject_map, collect_subjects};
