//! Subject map command implementation
//!
//! This module implements the `subject-map` command, the second pipeline
//! stage: enumerate subjects (real and addon), derive codes from the
//! persisted site map, and persist the result.

use super::exit_code_for;
use crate::adapters::mapstore::MapStore;
use crate::config::load_config;
use crate::core::mapping::{build_subject_map, collect_subjects, IdGenerator};
use clap::Args;

/// Arguments for the subject-map command
#[derive(Args, Debug)]
pub struct SubjectMapArgs {}

impl SubjectMapArgs {
    /// Execute the subject-map command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting subject map stage");

        println!("🗺️  Generating subject map");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // The site map must already be persisted; this stage never builds it
        let store = MapStore::new(&config.paths.mappings_root);
        let site_map = match store.load_site_map() {
            Ok(m) => m,
            Err(e) => {
                println!("❌ Failed to load site map");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        // Enumerate subjects from the declared sources
        let subjects = match collect_subjects(&config.mappings.subject_sources) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to read subject sources");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };
        let addon_subjects = config.addons.subject_set();
        tracing::info!(
            subjects = subjects.len(),
            addons = addon_subjects.len(),
            "Subjects found"
        );

        // Build the map
        let mut generator = IdGenerator::new(config.mappings.seed);
        let subject_map =
            match build_subject_map(&subjects, &addon_subjects, &site_map, &mut generator) {
                Ok(m) => m,
                Err(e) => {
                    println!("❌ Failed to build subject map");
                    println!("   Error: {e}");
                    return Ok(exit_code_for(&e));
                }
            };

        // Persist it
        if let Err(e) = store.save_subject_map(&subject_map) {
            println!("❌ Failed to write subject map");
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }

        println!(
            "✅ Subject map written: {}",
            store.subject_map_path().display()
        );
        println!();
        println!("Subject Map Summary:");
        println!("  Subjects: {}", subjects.len());
        println!("  Addon subjects: {}", addon_subjects.len());
        println!("  Entries (including site codes): {}", subject_map.len());
        println!();

        Ok(0)
    }
}
