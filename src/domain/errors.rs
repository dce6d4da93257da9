//! Domain error types
//!
//! This module defines the error hierarchy for Veil. All errors are
//! domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors reading declared data/mapping sources
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Errors building or loading pseudonym maps
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while reading declared source tables
///
/// A declared source is a curated input the configuration points at; problems
/// with one abort the current stage before any output is written.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A declared source path does not exist
    #[error("Source {0} does not exist")]
    NotFound(PathBuf),

    /// A required column is missing from a source expected to have it
    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A cell failed to parse as the type the source declares
    #[error("Invalid value '{value}' in column '{column}' of {path}")]
    InvalidValue {
        path: PathBuf,
        column: String,
        value: String,
    },

    /// The CSV layer rejected the file
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Reading the file failed at the I/O level
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a file failed at the I/O level
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while building or loading pseudonym maps
#[derive(Debug, Error)]
pub enum MappingError {
    /// A subject's site prefix is absent from the site map
    #[error("Site '{site}' for subject '{subject}' not found in site map")]
    SiteNotFound { site: String, subject: String },

    /// The collision-retry loop ran out of attempts
    #[error("Could not assign a unique {kind} code after {attempts} attempts")]
    CodesExhausted { kind: &'static str, attempts: usize },

    /// A stage was started before its prerequisite map was persisted
    #[error("Map file {path} not found; run `veil {stage}` first")]
    MapMissing { path: PathBuf, stage: &'static str },
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
