//! Anonymize command implementation
//!
//! This module implements the `anonymize` command, the final pipeline stage:
//! walk the data tree and write the anonymized output tree using the three
//! persisted maps.

use super::exit_code_for;
use crate::adapters::mapstore::MapStore;
use crate::config::load_config;
use crate::core::anonymize::{Anonymizer, WarningSink};
use clap::Args;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - process everything, write nothing
    #[arg(long)]
    pub dry_run: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymization stage");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let dry_run = self.dry_run || config.application.dry_run;

        // Load the three persisted maps; this stage builds nothing
        let store = MapStore::new(&config.paths.mappings_root);
        let maps = store.load_site_map().and_then(|site_map| {
            let subject_map = store.load_subject_map()?;
            let date_offsets = store.load_date_map()?;
            Ok((site_map, subject_map, date_offsets))
        });
        let (site_map, subject_map, date_offsets) = match maps {
            Ok(maps) => maps,
            Err(e) => {
                println!("❌ Failed to load persisted maps");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        tracing::info!(
            sites = site_map.len(),
            subjects = subject_map.len(),
            offsets = date_offsets.len(),
            "Maps loaded"
        );

        // Dry run mode
        if dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Anonymization Configuration:");
            println!("  Data root: {}", config.paths.data_root.display());
            println!("  Output root: {}", config.paths.output_root.display());
            println!("  Site entries: {}", site_map.len());
            println!("  Subject entries: {}", subject_map.len());
            println!("  Date offsets: {}", date_offsets.len());
            println!();
            print!("Proceed with anonymization? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Anonymization cancelled.");
                return Ok(0);
            }
        }

        println!("🚀 Starting anonymization...");
        println!();

        // Execute the walk
        let engine = Anonymizer::new(&site_map, &subject_map, &date_offsets).with_dry_run(dry_run);
        let mut warnings = WarningSink::new();
        let summary = match engine.run(
            &config.paths.data_root,
            &config.paths.output_root,
            &mut warnings,
        ) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Anonymization failed");
                eprintln!("Anonymization failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        // Display summary
        println!();
        println!("📊 Anonymization Summary:");
        println!("  Files Found: {}", summary.files_found);
        println!("  Files Written: {}", summary.files_written);
        println!("  Files Skipped: {}", summary.files_skipped);
        println!("  Rows Read: {}", summary.rows_read);
        println!("  Rows Dropped: {}", summary.rows_dropped);
        println!("  Cells Date-Shifted: {}", summary.cells_shifted);
        println!("  Warnings: {}", summary.warnings);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        // Determine exit code
        let exit_code = if summary.is_successful() {
            println!("✅ Anonymization completed successfully!");
            0
        } else {
            println!("⚠️  Anonymization completed with skipped files");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymize_args_defaults() {
        let args = AnonymizeArgs {
            yes: false,
            dry_run: false,
        };

        assert!(!args.yes);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_anonymize_args_with_overrides() {
        let args = AnonymizeArgs {
            yes: true,
            dry_run: true,
        };

        assert!(args.yes);
        assert!(args.dry_run);
    }
}
