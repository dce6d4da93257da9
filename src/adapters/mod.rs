//! Filesystem-facing integrations for Veil.
//!
//! This module provides adapters for the two kinds of artifacts the pipeline
//! touches on disk:
//!
//! - [`csv`] - Raw-text CSV table reading and writing
//! - [`mapstore`] - Persisted JSON pseudonym/offset maps
//!
//! # Design Pattern
//!
//! Adapters isolate I/O from the core map-building and anonymization logic,
//! so the core operates on fully materialized in-memory values and tests can
//! exercise it without touching the filesystem.
//!
//! # CSV Adapter
//!
//! Cells are kept as uninterpreted strings; the pipeline never coerces a
//! value it does not explicitly rewrite:
//!
//! ```rust,no_run
//! use veil::adapters::csv::read_table;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table = read_table(Path::new("data/PR-PR00001-visit.csv"))?;
//! println!("{} rows", table.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Map Store
//!
//! Each stage persists its result and the next stage reloads it, so stages
//! can run as separate processes sharing only the map files:
//!
//! ```rust,no_run
//! use veil::adapters::mapstore::MapStore;
//!
//! # fn example() -> veil::domain::Result<()> {
//! let store = MapStore::new("mappings");
//! let site_map = store.load_site_map()?;
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod mapstore;

// Re-export commonly used types
pub use self::csv::{read_table, write_table, CsvTable};
pub use mapstore::MapStore;
