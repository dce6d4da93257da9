//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! Run-level anonymization warnings are not logged directly through this
//! module; they flow through an explicit deduplicating sink
//! ([`crate::core::anonymize::WarningSink`]) so repeated runs never share
//! state.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Stage started");
//! tracing::warn!(subject = "PR00001", "Subject not in date offset map");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
