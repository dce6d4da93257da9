//! Domain models and types for Veil.
//!
//! This module contains the core domain models, types, and business rules
//! for the deidentification pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SiteId`], [`SubjectCode`])
//! - **Typed pseudonym maps** ([`SiteMap`], [`SubjectMap`], [`DateOffsetMap`])
//! - **Error types** ([`VeilError`], [`SourceError`], [`MappingError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Veil uses the newtype pattern for generated pseudonyms, and distinct map
//! types so one kind of lookup table can't be passed where another is
//! expected:
//!
//! ```rust
//! use veil::domain::{SiteId, SubjectCode};
//!
//! # fn example() -> Result<(), String> {
//! let site_id = SiteId::new("AB")?;
//! let subject = SubjectCode::new("PR00001")?;
//!
//! // This won't compile - type safety prevents mixing codes
//! // let wrong: SiteId = subject;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VeilError>`]:
//!
//! ```rust,no_run
//! use veil::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = veil::config::load_config("veil.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod maps;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{MappingError, SourceError, VeilError};
pub use ids::{SiteId, SubjectCode};
pub use maps::{DateOffsetMap, SiteMap, SubjectMap, COMBINED};
pub use result::Result;
