//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your study's paths and sources", self.output);
                println!("  2. Validate configuration: veil validate-config");
                println!("  3. Build the maps: veil site-map && veil subject-map && veil date-map");
                println!("  4. Anonymize the data tree: veil anonymize");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Veil Configuration File
# Research Study Deidentification Tool

[application]
name = "veil"
log_level = "info"
dry_run = false

[paths]
data_root = "/study/data"
output_root = "/study/anonymized"
mappings_root = "/study/mappings"

[mappings]
site_sources = ["/study/sources/enrollment.csv"]
subject_sources = ["/study/sources/enrollment.csv"]
date_sources = ["/study/sources/offsets.csv"]
skip_site_map = false

[addons]
subjects = []
date_subjects = []

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Veil Configuration File
# Research Study Deidentification Tool
#
# The pipeline runs in four strictly ordered stages, each persisting a map
# the next stage reloads from disk:
#
#   veil site-map      -> mappings_root/site_mapping.json
#   veil subject-map   -> mappings_root/subject_mapping.json
#   veil date-map      -> mappings_root/subject_date_mapping.json
#   veil anonymize     -> output_root/** (anonymized copy of data_root/**)

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Application name (used in logging)
name = "veil"

# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (process everything, write nothing)
dry_run = false

# ============================================================================
# Directory Roots
# ============================================================================
[paths]
# Root of the source data tree (only *.csv files are processed)
data_root = "/study/data"

# Root of the anonymized output tree (must differ from data_root)
output_root = "/study/anonymized"

# Directory holding the persisted map files
mappings_root = "/study/mappings"

# ============================================================================
# Mapping Sources
# ============================================================================
[mappings]
# Tables whose subject column enumerates sites (via 2-character prefixes)
site_sources = ["/study/sources/enrollment.csv"]

# Tables whose subject column enumerates participants
subject_sources = [
    "/study/sources/enrollment.csv",
    "/study/sources/screening.csv",
]

# Tables with literal `subject` and `days` columns declaring date offsets.
# Later sources overwrite earlier ones for the same subject.
date_sources = ["/study/sources/offsets.csv"]

# Map every site to itself (non-blinded test runs only)
skip_site_map = false

# Optional seed for reproducible pseudonym assignment
# seed = 42

# ============================================================================
# Addon Identities
# ============================================================================
[addons]
# Synthetic subject codes pseudonymized alongside real ones
subjects = ["PR99999"]

# Subject codes that receive a synthetic date offset (drawn from
# -14, -7, 7, 14), overwriting any declared offset
date_subjects = ["PR99999"]

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = true

# Local log directory
local_path = "logs"

# Log rotation (daily or hourly)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"#
        .to_string()
    }
}
