//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Veil configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration (validation happens on load)
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Data Root: {}", config.paths.data_root.display());
        println!("  Output Root: {}", config.paths.output_root.display());
        println!("  Mappings Root: {}", config.paths.mappings_root.display());
        println!("  Site Sources: {}", config.mappings.site_sources.len());
        println!(
            "  Subject Sources: {}",
            config.mappings.subject_sources.len()
        );
        println!("  Date Sources: {}", config.mappings.date_sources.len());
        println!("  Skip Site Map: {}", config.mappings.skip_site_map);
        if let Some(seed) = config.mappings.seed {
            println!("  Seed: {seed}");
        }
        println!("  Addon Subjects: {}", config.addons.subject_set().len());
        println!(
            "  Addon Date Subjects: {}",
            config.addons.date_subject_set().len()
        );
        println!();

        Ok(0)
    }
}
