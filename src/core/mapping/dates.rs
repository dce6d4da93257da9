//! Date-offset map construction (pipeline stage 3)
//!
//! Offset sources are curated tables with literal `subject` and `days`
//! columns. Within one source the first row per subject wins; across sources
//! a later source overwrites an earlier one. Addon subjects draw their
//! offset from a fixed candidate set and overwrite anything declared.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::codegen::IdGenerator;
use crate::adapters::csv::read_table;
use crate::domain::errors::SourceError;
use crate::domain::maps::DateOffsetMap;
use crate::domain::Result;

/// Builds the date-offset map from declared sources plus addon subjects.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] for a missing source,
/// [`SourceError::MissingColumn`] when `subject` or `days` is absent, and
/// [`SourceError::InvalidValue`] for a `days` cell that is not a signed
/// integer.
pub fn build_date_offset_map(
    sources: &[PathBuf],
    addon_subjects: &BTreeSet<String>,
    generator: &mut IdGenerator,
) -> Result<DateOffsetMap> {
    let mut merged = DateOffsetMap::new();

    for source in sources {
        tracing::info!(source = %source.display(), "Reading date offsets from source");
        let per_source = offsets_in_source(source)?;
        tracing::debug!(source = %source.display(), count = per_source.len(), "Offsets found");
        merged.extend_overwrite(per_source);
    }

    for subject in addon_subjects {
        merged.insert(subject.clone(), generator.addon_offset());
    }

    Ok(merged)
}

fn offsets_in_source(path: &Path) -> Result<DateOffsetMap> {
    let table = read_table(path)?;

    let subject_col = table
        .column_index("subject")
        .ok_or_else(|| SourceError::MissingColumn {
            path: path.to_path_buf(),
            column: "subject".to_string(),
        })?;
    let days_col = table
        .column_index("days")
        .ok_or_else(|| SourceError::MissingColumn {
            path: path.to_path_buf(),
            column: "days".to_string(),
        })?;

    let mut map = DateOffsetMap::new();
    for row in &table.rows {
        let subject = row[subject_col].trim();
        if subject.is_empty() {
            continue;
        }

        let days: i64 =
            row[days_col]
                .trim()
                .parse()
                .map_err(|_| SourceError::InvalidValue {
                    path: path.to_path_buf(),
                    column: "days".to_string(),
                    value: row[days_col].clone(),
                })?;

        map.insert_if_absent(subject, days);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::codegen::ADDON_OFFSETS;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_first_row_wins_within_source() {
        let file = source("subject,days\nPR00001,7\nPR00001,14\n");
        let mut gen = IdGenerator::from_seed(1);
        let map = build_date_offset_map(
            &[file.path().to_path_buf()],
            &BTreeSet::new(),
            &mut gen,
        )
        .unwrap();

        assert_eq!(map.get("PR00001"), Some(7));
    }

    #[test]
    fn test_later_source_overwrites() {
        let first = source("subject,days\nPR00001,7\nPR00002,-7\n");
        let second = source("subject,days\nPR00001,14\n");
        let mut gen = IdGenerator::from_seed(2);
        let map = build_date_offset_map(
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            &BTreeSet::new(),
            &mut gen,
        )
        .unwrap();

        assert_eq!(map.get("PR00001"), Some(14));
        assert_eq!(map.get("PR00002"), Some(-7));
    }

    #[test]
    fn test_addons_overwrite_declared_values() {
        let file = source("subject,days\nPR00001,365\n");
        let addons: BTreeSet<String> = ["PR00001".to_string()].into_iter().collect();
        let mut gen = IdGenerator::from_seed(3);
        let map =
            build_date_offset_map(&[file.path().to_path_buf()], &addons, &mut gen).unwrap();

        let offset = map.get("PR00001").unwrap();
        assert_ne!(offset, 365);
        assert!(ADDON_OFFSETS.contains(&offset));
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let mut gen = IdGenerator::from_seed(4);
        let err = build_date_offset_map(
            &[PathBuf::from("/nonexistent/offsets.csv")],
            &BTreeSet::new(),
            &mut gen,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            crate::domain::VeilError::Source(SourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_days_column_is_fatal() {
        let file = source("subject,offset\nPR00001,7\n");
        let mut gen = IdGenerator::from_seed(5);
        let err = build_date_offset_map(
            &[file.path().to_path_buf()],
            &BTreeSet::new(),
            &mut gen,
        )
        .unwrap_err();

        assert!(err.to_string().contains("days"));
    }

    #[test]
    fn test_malformed_days_is_fatal() {
        let file = source("subject,days\nPR00001,soon\n");
        let mut gen = IdGenerator::from_seed(6);
        let err = build_date_offset_map(
            &[file.path().to_path_buf()],
            &BTreeSet::new(),
            &mut gen,
        )
        .unwrap_err();

        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_negative_offsets_parse() {
        let file = source("subject,days\nPR00001,-14\n");
        let mut gen = IdGenerator::from_seed(7);
        let map = build_date_offset_map(
            &[file.path().to_path_buf()],
            &BTreeSet::new(),
            &mut gen,
        )
        .unwrap();

        assert_eq!(map.get("PR00001"), Some(-14));
    }
}
