//! Main anonymization engine
//!
//! This module provides the core [`Anonymizer`] that walks a source tree of
//! CSV files and writes a parallel anonymized tree.
//!
//! # Architecture
//!
//! The engine consumes three read-only maps built by the earlier pipeline
//! stages:
//! - **Site map**: original site code -> anonymized site code
//! - **Subject map**: original subject code -> anonymized subject code
//!   (superset table, also resolves site codes and organizational labels)
//! - **Date-offset map**: original subject code -> signed day offset
//!
//! Per file: every cell of every column is a date-shift candidate, subject
//! columns are substituted (unmapped rows dropped), a `site` column is
//! substituted, and the filename is rewritten. Degraded conditions skip the
//! file or drop the row with a deduplicated warning; nothing aborts the walk.
//!
//! # Examples
//!
//! ```no_run
//! use veil::core::anonymize::{Anonymizer, WarningSink};
//! use veil::adapters::mapstore::MapStore;
//! use std::path::Path;
//!
//! # fn example() -> veil::domain::Result<()> {
//! let store = MapStore::new("mappings");
//! let site_map = store.load_site_map()?;
//! let subject_map = store.load_subject_map()?;
//! let date_offsets = store.load_date_map()?;
//!
//! let engine = Anonymizer::new(&site_map, &subject_map, &date_offsets);
//! let mut warnings = WarningSink::new();
//! let summary = engine.run(Path::new("data"), Path::new("output"), &mut warnings)?;
//! println!("Wrote {} files", summary.files_written);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::dates::shift_date_cell;
use super::filename::{anonymize_filename, filename_subject};
use super::summary::RunSummary;
use super::warnings::WarningSink;
use crate::adapters::csv::{read_table, write_table, CsvTable};
use crate::domain::ids::SubjectCode;
use crate::domain::maps::{DateOffsetMap, SiteMap, SubjectMap};
use crate::domain::{Result, VeilError};

/// Tree-walking anonymizer over read-only maps
///
/// The maps are never mutated during a run; the only mutable state is the
/// caller-supplied [`WarningSink`] and the returned [`RunSummary`].
pub struct Anonymizer<'a> {
    site_map: &'a SiteMap,
    subject_map: &'a SubjectMap,
    date_offsets: &'a DateOffsetMap,
    dry_run: bool,
}

impl<'a> Anonymizer<'a> {
    /// Creates an engine over the three persisted maps
    pub fn new(
        site_map: &'a SiteMap,
        subject_map: &'a SubjectMap,
        date_offsets: &'a DateOffsetMap,
    ) -> Self {
        Self {
            site_map,
            subject_map,
            date_offsets,
            dry_run: false,
        }
    }

    /// Enables dry-run mode: process everything, write nothing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Anonymizes every CSV file under `data_root` into `output_root`.
    ///
    /// The output tree mirrors the input tree with rewritten filenames;
    /// non-CSV files are ignored entirely. Per-file failures degrade to
    /// skips with a warning and never abort the walk.
    ///
    /// # Errors
    ///
    /// Returns an error only for walk-level problems (unreadable data root).
    pub fn run(
        &self,
        data_root: &Path,
        output_root: &Path,
        warnings: &mut WarningSink,
    ) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::new();

        let files = walk_csv_files(data_root)?;
        tracing::info!(
            data_root = %data_root.display(),
            files = files.len(),
            dry_run = self.dry_run,
            "Starting anonymization walk"
        );

        for path in files {
            summary.files_found += 1;
            match self.process_file(&path, data_root, output_root, warnings, &mut summary) {
                Ok(true) => summary.files_written += 1,
                Ok(false) => summary.files_skipped += 1,
                Err(e) => {
                    summary.files_skipped += 1;
                    warnings.warn_once(format!("Ignoring file {}: {e}", path.display()));
                }
            }
        }

        summary.warnings = warnings.distinct_count();
        summary.duration = started.elapsed();

        tracing::info!(
            files_written = summary.files_written,
            files_skipped = summary.files_skipped,
            rows_dropped = summary.rows_dropped,
            cells_shifted = summary.cells_shifted,
            "Anonymization walk finished"
        );

        Ok(summary)
    }

    /// Processes one file; Ok(false) means skipped with a warning.
    fn process_file(
        &self,
        path: &Path,
        data_root: &Path,
        output_root: &Path,
        warnings: &mut WarningSink,
        summary: &mut RunSummary,
    ) -> Result<bool> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let anonymized_name = match anonymize_filename(&file_name, self.site_map, self.subject_map)
        {
            Ok(name) => name,
            Err(e) => {
                warnings.warn_once(format!("Ignoring file {}: {e}", path.display()));
                return Ok(false);
            }
        };

        let table = read_table(path)?;
        let file_subject = filename_subject(&file_name);
        let anonymized = self.anonymize_table(table, file_subject.as_deref(), warnings, summary);

        let relative = path
            .strip_prefix(data_root)
            .map_err(|_| VeilError::Other(format!("{} is outside the data root", path.display())))?;
        let output_path = output_root.join(relative).with_file_name(&anonymized_name);

        if self.dry_run {
            tracing::debug!(output = %output_path.display(), "Dry run, skipping write");
        } else {
            write_table(&output_path, &anonymized)?;
        }

        Ok(true)
    }

    /// Applies date shifting and identity substitution to one table.
    fn anonymize_table(
        &self,
        mut table: CsvTable,
        file_subject: Option<&str>,
        warnings: &mut WarningSink,
        summary: &mut RunSummary,
    ) -> CsvTable {
        let subject_cols = table.columns_containing("subject");
        let identity_col = subject_cols.first().copied();

        summary.rows_read += table.row_count();

        // Date shift first: offsets are keyed by original subject codes
        for row in &mut table.rows {
            let Some(subject) = resolve_row_subject(row, identity_col, file_subject) else {
                continue;
            };
            let Some(offset) = self.date_offsets.get(&subject) else {
                warnings.warn_once(format!("Subject {subject} not in date offset map"));
                continue;
            };
            for cell in row.iter_mut() {
                if let Some(shifted) = shift_date_cell(cell, offset) {
                    if shifted != *cell {
                        *cell = shifted;
                        summary.cells_shifted += 1;
                    }
                }
            }
        }

        // Subject substitution: rows with an unmapped value are dropped
        if !subject_cols.is_empty() {
            let subject_map = self.subject_map;
            let rows_before = table.rows.len();
            table.rows.retain_mut(|row| {
                for &idx in &subject_cols {
                    match subject_map.get(&row[idx]) {
                        Some(code) => row[idx] = code.to_string(),
                        None => return false,
                    }
                }
                true
            });
            summary.rows_dropped += rows_before - table.rows.len();
        }

        // Site substitution: unmapped values are blanked, not dropped
        if let Some(site_col) = table.column_index("site") {
            for row in &mut table.rows {
                row[site_col] = self
                    .site_map
                    .get(&row[site_col])
                    .unwrap_or_default()
                    .to_string();
            }
        }

        table
    }
}

/// Resolves the subject owning a row, for date-offset lookup.
///
/// The identity column wins when it carries a full participant code;
/// otherwise the filename's subject segment is used when it is one. Rows
/// with neither keep their dates unshifted.
fn resolve_row_subject(
    row: &[String],
    identity_col: Option<usize>,
    file_subject: Option<&str>,
) -> Option<String> {
    if let Some(idx) = identity_col {
        if let Ok(code) = SubjectCode::new(row[idx].trim()) {
            if code.is_full_code() {
                return Some(code.into_inner());
            }
        }
    }

    file_subject
        .and_then(|s| SubjectCode::new(s).ok())
        .filter(SubjectCode::is_full_code)
        .map(SubjectCode::into_inner)
}

/// Collects every CSV file under `root`, depth-first with sorted entries.
fn walk_csv_files(root: &Path) -> Result<Vec<PathBuf>> {
    fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        let mut entries = std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(std::fs::DirEntry::file_name);

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                visit(&path, files)?;
            } else if is_csv(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    visit(root, &mut files)
        .map_err(|e| VeilError::Io(format!("Failed to walk {}: {e}", root.display())))?;
    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
