//! Configuration schema types
//!
//! This module defines the configuration structure for Veil.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Main Veil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Directory roots the pipeline operates on
    pub paths: PathsConfig,

    /// Mapping sources and generation settings
    pub mappings: MappingsConfig,

    /// Synthetic addon identities
    #[serde(default)]
    pub addons: AddonsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.paths.validate()?;
        self.mappings.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name (used in logging)
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (process everything, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "application.log_level must be one of {LEVELS:?}, got '{}'",
                self.log_level
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Directory roots the pipeline operates on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the source data tree
    pub data_root: PathBuf,

    /// Root of the anonymized output tree
    pub output_root: PathBuf,

    /// Directory holding the persisted map files
    pub mappings_root: PathBuf,
}

impl PathsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_root.as_os_str().is_empty() {
            return Err("paths.data_root must not be empty".to_string());
        }
        if self.output_root.as_os_str().is_empty() {
            return Err("paths.output_root must not be empty".to_string());
        }
        if self.mappings_root.as_os_str().is_empty() {
            return Err("paths.mappings_root must not be empty".to_string());
        }
        if self.data_root == self.output_root {
            return Err("paths.output_root must differ from paths.data_root".to_string());
        }
        Ok(())
    }
}

/// Mapping sources and generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingsConfig {
    /// Tables enumerating sites (via subject-column prefixes)
    pub site_sources: Vec<PathBuf>,

    /// Tables enumerating subjects
    pub subject_sources: Vec<PathBuf>,

    /// Tables declaring `subject`/`days` offset rows
    #[serde(default)]
    pub date_sources: Vec<PathBuf>,

    /// Map every site to itself (non-blinded test runs)
    #[serde(default)]
    pub skip_site_map: bool,

    /// Optional seed for reproducible pseudonym assignment
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MappingsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.site_sources.is_empty() {
            return Err("mappings.site_sources must declare at least one source".to_string());
        }
        if self.subject_sources.is_empty() {
            return Err("mappings.subject_sources must declare at least one source".to_string());
        }
        Ok(())
    }
}

/// Synthetic addon identities merged into the maps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonsConfig {
    /// Addon subject codes, pseudonymized like real ones
    #[serde(default)]
    pub subjects: Vec<String>,

    /// Subject codes that receive a synthetic date offset
    #[serde(default)]
    pub date_subjects: Vec<String>,
}

impl AddonsConfig {
    /// Addon subjects as a trimmed, de-duplicated set
    pub fn subject_set(&self) -> BTreeSet<String> {
        Self::to_set(&self.subjects)
    }

    /// Date-offset addon subjects as a trimmed, de-duplicated set
    pub fn date_subject_set(&self) -> BTreeSet<String> {
        Self::to_set(&self.date_subjects)
    }

    fn to_set(values: &[String]) -> BTreeSet<String> {
        values
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily or hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_log_max_size")]
    pub local_max_size_mb: u64,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        const ROTATIONS: [&str; 2] = ["daily", "hourly"];
        if !ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "logging.local_rotation must be one of {ROTATIONS:?}, got '{}'",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
            local_max_size_mb: default_log_max_size(),
        }
    }
}

fn default_app_name() -> String {
    "veil".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

fn default_log_max_size() -> u64 {
    100
}
