//! Configuration management for Veil.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Veil uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("veil.toml")?;
//!
//! // Access configuration sections
//! println!("Data root: {}", config.paths.data_root.display());
//! println!("Sources: {}", config.mappings.site_sources.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (name, log level, dry run)
//! - [`PathsConfig`] - Data, output, and mappings directory roots
//! - [`MappingsConfig`] - Mapping sources, skip flag, optional seed
//! - [`AddonsConfig`] - Synthetic addon subject codes
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "veil"
//! log_level = "info"
//!
//! [paths]
//! data_root = "/study/data"
//! output_root = "/study/anonymized"
//! mappings_root = "/study/mappings"
//!
//! [mappings]
//! site_sources = ["/study/sources/enrollment.csv"]
//! subject_sources = ["/study/sources/enrollment.csv"]
//! date_sources = ["/study/sources/offsets.csv"]
//!
//! [addons]
//! subjects = ["PR99999"]
//! date_subjects = ["PR99999"]
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution, and
//! `VEIL_<SECTION>_<KEY>` variables (e.g. `VEIL_PATHS_DATA_ROOT`) to
//! override individual settings.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AddonsConfig, ApplicationConfig, LoggingConfig, MappingsConfig, PathsConfig, VeilConfig,
};
