// Veil - Research Study Deidentification Tool
// Copyright (c) 2026 Veil Contributors
// Licensed under the MIT License

//! # Veil - Research Study Deidentification
//!
//! Veil is a batch deidentification tool for multi-site research study data.
//! It replaces site codes, participant codes, and calendar dates across a
//! tree of CSV files, producing a parallel output tree with no recoverable
//! link to the originals.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Site maps**: random unique 2-letter codes per data-collection site
//! - **Subject maps**: per-participant codes derived from the anonymized
//!   site code, plus organizational passthrough labels
//! - **Date-offset maps**: per-participant day offsets that break absolute
//!   calendar correlation while preserving relative interval structure
//! - **Anonymization**: tree walking, date shifting, identity substitution,
//!   and filename rewriting driven by the persisted maps
//!
//! ## Architecture
//!
//! Veil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (map construction, anonymization)
//! - [`adapters`] - Filesystem integrations (CSV tables, persisted maps)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Pipeline
//!
//! The four stages are strictly sequential; each persists its map and the
//! next reloads it from disk, so stages can run as separate invocations
//! sharing only the map files:
//!
//! ```rust,no_run
//! use veil::adapters::mapstore::MapStore;
//! use veil::config::load_config;
//! use veil::core::mapping::{build_site_map, collect_sites, IdGenerator};
//!
//! # fn main() -> veil::domain::Result<()> {
//! // Stage 1: build and persist the site map
//! let config = load_config("veil.toml")?;
//! let sites = collect_sites(&config.mappings.site_sources)?;
//!
//! let mut generator = IdGenerator::new(config.mappings.seed);
//! let site_map = build_site_map(&sites, config.mappings.skip_site_map, &mut generator)?;
//!
//! MapStore::new(&config.paths.mappings_root).save_site_map(&site_map)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Semantics
//!
//! Map-building integrity problems (a missing declared source, a subject
//! whose site is unmapped) are fatal and leave no partial map file. During
//! anonymization, unmapped files and rows degrade gracefully: the file is
//! skipped or the row dropped, a deduplicated warning is emitted, and the
//! walk continues.
//!
//! ## Error Handling
//!
//! Veil uses the [`domain::VeilError`] type for all errors:
//!
//! ```rust,no_run
//! use veil::domain::VeilError;
//!
//! fn example() -> Result<(), VeilError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = veil::config::load_config("veil.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Veil uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting site map stage");
//! warn!(subject = "PR00001", "Subject not in date offset map");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
