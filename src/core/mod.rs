//! Core business logic for Veil.
//!
//! This module contains the map-building and anonymization logic of the
//! deidentification pipeline.
//!
//! # Modules
//!
//! - [`mapping`] - Pseudonym and date-offset map construction (stages 1-3)
//! - [`anonymize`] - Tree-walking anonymization engine (stage 4)
//!
//! # Pipeline Workflow
//!
//! The stages are strictly sequential; each persists its map and the next
//! reloads it from disk:
//!
//! 1. **Site map**: assign each site a random unique 2-letter code
//! 2. **Subject map**: assign each participant a code derived from its
//!    site's anonymized code
//! 3. **Date-offset map**: consolidate per-participant day offsets
//! 4. **Anonymize**: rewrite file contents and names through the maps
//!
//! # Example
//!
//! ```rust,no_run
//! use veil::core::mapping::{build_site_map, collect_sites, IdGenerator};
//! use veil::adapters::mapstore::MapStore;
//! use std::path::PathBuf;
//!
//! # fn example() -> veil::domain::Result<()> {
//! let sources = vec![PathBuf::from("sources/enrollment.csv")];
//! let sites = collect_sites(&sources)?;
//!
//! let mut generator = IdGenerator::from_entropy();
//! let site_map = build_site_map(&sites, false, &mut generator)?;
//!
//! MapStore::new("mappings").save_site_map(&site_map)?;
//! # Ok(())
//! # }
//! ```

pub mod anonymize;
pub mod mapping;
