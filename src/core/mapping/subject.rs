//! Subject map construction (pipeline stage 2)
//!
//! Each participant's anonymized code is their site's anonymized code plus a
//! random 5-digit suffix, so an anonymized subject still sorts under its
//! (anonymized) site. Addon subjects from configuration share the same
//! uniqueness space as real ones.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::codegen::{IdGenerator, MAX_CODE_ATTEMPTS};
use crate::adapters::csv::read_table;
use crate::domain::errors::{MappingError, SourceError};
use crate::domain::ids::SubjectCode;
use crate::domain::maps::{SiteMap, SubjectMap};
use crate::domain::Result;

/// Organizational labels that appear in subject columns and must survive
/// anonymization; upper-case variants normalize to the canonical form.
const PASSTHROUGH_LABELS: &[(&str, &str)] = &[
    ("NORTHSTAR", "NORTHSTAR"),
    ("Aurora", "Aurora"),
    ("AURORA", "Aurora"),
    ("Borealis", "Borealis"),
    ("BOREALIS", "Borealis"),
];

/// Builds the subject map for real and addon participants.
///
/// Every subject's site prefix must already be present in `site_map`; the
/// anonymized code is the mapped site code plus a unique 5-digit suffix
/// using digits 1-9. After assignment the fixed organizational passthrough
/// labels are added and every `site_map` entry is copied in, so a single
/// lookup table resolves either kind of code.
///
/// # Errors
///
/// Returns [`MappingError::SiteNotFound`] when a subject's prefix has no
/// site-map entry, and [`MappingError::CodesExhausted`] when a unique suffix
/// cannot be found within the attempt cap.
pub fn build_subject_map(
    subjects: &BTreeSet<String>,
    addon_subjects: &BTreeSet<String>,
    site_map: &SiteMap,
    generator: &mut IdGenerator,
) -> Result<SubjectMap> {
    let mut map = SubjectMap::new();

    for subject in subjects.iter().chain(addon_subjects.iter()) {
        if map.contains_subject(subject) {
            continue;
        }
        let code = assign_subject_code(subject, &map, site_map, generator)?;
        map.insert(subject.clone(), code);
    }

    for (original, canonical) in PASSTHROUGH_LABELS {
        map.insert(*original, *canonical);
    }

    map.absorb_sites(site_map);

    Ok(map)
}

/// Generates an anonymized code for one subject, unique among assigned values.
fn assign_subject_code(
    subject: &str,
    map: &SubjectMap,
    site_map: &SiteMap,
    generator: &mut IdGenerator,
) -> Result<String> {
    let prefix = SubjectCode::new(subject)
        .map(|code| code.site_prefix())
        .unwrap_or_default();

    let site_code = site_map
        .get(&prefix)
        .ok_or_else(|| MappingError::SiteNotFound {
            site: prefix.clone(),
            subject: subject.to_string(),
        })?;

    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = format!("{site_code}{}", generator.subject_suffix());
        if !map.contains_code(&candidate) {
            return Ok(candidate);
        }
    }
    Err(MappingError::CodesExhausted {
        kind: "subject",
        attempts: MAX_CODE_ATTEMPTS,
    }
    .into())
}

/// Enumerates the distinct subject codes declared by the given source tables.
///
/// Each source must carry a column whose name contains `subject`
/// (case-insensitive).
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] for a missing source and
/// [`SourceError::MissingColumn`] when a source has no subject column.
pub fn collect_subjects(sources: &[PathBuf]) -> Result<BTreeSet<String>> {
    let mut subjects = BTreeSet::new();
    for source in sources {
        tracing::info!(source = %source.display(), "Reading subjects from source");
        let found = subjects_in_source(source)?;
        tracing::debug!(source = %source.display(), count = found.len(), "Subjects found");
        subjects.extend(found);
    }
    Ok(subjects)
}

fn subjects_in_source(path: &Path) -> Result<BTreeSet<String>> {
    let table = read_table(path)?;
    let subject_col =
        table
            .find_column_containing("subject")
            .ok_or_else(|| SourceError::MissingColumn {
                path: path.to_path_buf(),
                column: "subject".to_string(),
            })?;

    Ok(table.distinct_values(subject_col).into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::maps::COMBINED;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn test_site_map() -> SiteMap {
        let mut map = SiteMap::new();
        map.insert("PR", "AB");
        map.insert("LA", "CD");
        map
    }

    #[test]
    fn test_codes_use_site_prefix_and_nonzero_digits() {
        let mut gen = IdGenerator::from_seed(1);
        let map = build_subject_map(
            &set(&["PR00001", "LA00002"]),
            &BTreeSet::new(),
            &test_site_map(),
            &mut gen,
        )
        .unwrap();

        let code = map.get("PR00001").unwrap();
        assert!(code.starts_with("AB"));
        assert_eq!(code.len(), 7);
        assert!(code[2..].chars().all(|c| ('1'..='9').contains(&c)));

        assert!(map.get("LA00002").unwrap().starts_with("CD"));
    }

    #[test]
    fn test_codes_are_pairwise_distinct() {
        let mut gen = IdGenerator::from_seed(2);
        let subjects: BTreeSet<String> = (0..200).map(|i| format!("PR{i:05}")).collect();
        let map =
            build_subject_map(&subjects, &BTreeSet::new(), &test_site_map(), &mut gen).unwrap();

        let codes: std::collections::HashSet<&str> =
            subjects.iter().map(|s| map.get(s).unwrap()).collect();
        assert_eq!(codes.len(), subjects.len());
    }

    #[test]
    fn test_unknown_site_is_fatal() {
        let mut gen = IdGenerator::from_seed(3);
        let err = build_subject_map(
            &set(&["ZZ00001"]),
            &BTreeSet::new(),
            &test_site_map(),
            &mut gen,
        )
        .unwrap_err();

        assert!(err.to_string().contains("ZZ"));
        assert!(matches!(
            err,
            crate::domain::VeilError::Mapping(MappingError::SiteNotFound { .. })
        ));
    }

    #[test]
    fn test_addon_subjects_share_uniqueness_space() {
        let mut gen = IdGenerator::from_seed(4);
        let map = build_subject_map(
            &set(&["PR00001"]),
            &set(&["PR99999"]),
            &test_site_map(),
            &mut gen,
        )
        .unwrap();

        let real = map.get("PR00001").unwrap();
        let addon = map.get("PR99999").unwrap();
        assert!(addon.starts_with("AB"));
        assert_ne!(real, addon);
    }

    #[test]
    fn test_passthrough_labels_present() {
        let mut gen = IdGenerator::from_seed(5);
        let map = build_subject_map(
            &BTreeSet::new(),
            &BTreeSet::new(),
            &test_site_map(),
            &mut gen,
        )
        .unwrap();

        assert_eq!(map.get("NORTHSTAR"), Some("NORTHSTAR"));
        assert_eq!(map.get("Aurora"), Some("Aurora"));
        assert_eq!(map.get("AURORA"), Some("Aurora"));
        assert_eq!(map.get("BOREALIS"), Some("Borealis"));
    }

    #[test]
    fn test_site_entries_absorbed() {
        let mut gen = IdGenerator::from_seed(6);
        let map = build_subject_map(
            &set(&["PR00001"]),
            &BTreeSet::new(),
            &test_site_map(),
            &mut gen,
        )
        .unwrap();

        assert_eq!(map.get("PR"), Some("AB"));
        assert_eq!(map.get("LA"), Some("CD"));
        assert_eq!(map.get(COMBINED), Some(COMBINED));
    }

    #[test]
    fn test_collect_subjects_from_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "subjectid,days\nPR00001,7\nPR00001,7\nLA00002,-7\n").unwrap();

        let found = collect_subjects(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(found, set(&["PR00001", "LA00002"]));
    }

    #[test]
    fn test_collect_subjects_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "record_id,value\n1,2\n").unwrap();

        let err = collect_subjects(&[file.path().to_path_buf()]).unwrap_err();
        assert!(err.to_string().contains("subject"));
    }
}
