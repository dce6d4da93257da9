//! Filename anonymization
//!
//! Data files are named `site-subject-suffix.csv`. The site and subject
//! segments are identifying and must map; the suffix is opaque and kept
//! as-is. Study-level metadata files that don't follow the convention pass
//! through verbatim.

use thiserror::Error;

use crate::domain::maps::{SiteMap, SubjectMap};

/// Why a filename could not be anonymized
///
/// All variants degrade to a file-level skip with a warning; none abort the
/// run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilenameError {
    /// Not enough hyphen segments to carry a site and a subject
    #[error("Invalid file name: {0}")]
    Unsplittable(String),

    /// The site segment has no site-map entry
    #[error("Invalid site '{site}' in file name: {name}")]
    UnknownSite { name: String, site: String },

    /// The subject segment has no subject-map entry
    #[error("Invalid subject '{subject}' in file name: {name}")]
    UnknownSubject { name: String, subject: String },
}

/// Rewrites a `site-subject-suffix.csv` filename through the maps.
///
/// Filenames ending in `metadata.csv` that are too short to carry both a
/// site and a subject segment pass through verbatim; any other unsplittable
/// or unmappable name is an error (the caller skips the file).
pub fn anonymize_filename(
    name: &str,
    site_map: &SiteMap,
    subject_map: &SubjectMap,
) -> Result<String, FilenameError> {
    let parts: Vec<&str> = name.split('-').collect();

    if parts.len() < 3 && name.ends_with("metadata.csv") {
        return Ok(name.to_string());
    }
    if parts.len() < 2 {
        return Err(FilenameError::Unsplittable(name.to_string()));
    }

    let site = parts[0];
    let subject = parts[1];
    let suffix = parts[2..].join("-");

    let site_code = site_map
        .get(site)
        .ok_or_else(|| FilenameError::UnknownSite {
            name: name.to_string(),
            site: site.to_string(),
        })?;
    let subject_code = subject_map
        .get(subject)
        .ok_or_else(|| FilenameError::UnknownSubject {
            name: name.to_string(),
            subject: subject.to_string(),
        })?;

    Ok(format!("{site_code}-{subject_code}-{suffix}"))
}

/// Extracts the subject segment of a data filename, if present.
///
/// Rows without an identity column fall back to this value to resolve their
/// date offset.
pub fn filename_subject(name: &str) -> Option<String> {
    name.split('-').nth(1).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> (SiteMap, SubjectMap) {
        let mut site_map = SiteMap::new();
        site_map.insert("PR", "AB");

        let mut subject_map = SubjectMap::new();
        subject_map.insert("PR00001", "AB12345");
        subject_map.absorb_sites(&site_map);

        (site_map, subject_map)
    }

    #[test]
    fn test_rewrites_site_and_subject() {
        let (site_map, subject_map) = maps();
        assert_eq!(
            anonymize_filename("PR-PR00001-visit.csv", &site_map, &subject_map),
            Ok("AB-AB12345-visit.csv".to_string())
        );
    }

    #[test]
    fn test_suffix_hyphens_are_preserved() {
        let (site_map, subject_map) = maps();
        assert_eq!(
            anonymize_filename("PR-PR00001-visit-2-notes.csv", &site_map, &subject_map),
            Ok("AB-AB12345-visit-2-notes.csv".to_string())
        );
    }

    #[test]
    fn test_combined_files_keep_grouping() {
        let (site_map, subject_map) = maps();
        assert_eq!(
            anonymize_filename("combined-combined-summary.csv", &site_map, &subject_map),
            Ok("combined-combined-summary.csv".to_string())
        );
    }

    #[test]
    fn test_short_metadata_name_passes_through() {
        let (site_map, subject_map) = maps();
        assert_eq!(
            anonymize_filename("study-metadata.csv", &site_map, &subject_map),
            Ok("study-metadata.csv".to_string())
        );
        assert_eq!(
            anonymize_filename("metadata.csv", &site_map, &subject_map),
            Ok("metadata.csv".to_string())
        );
    }

    #[test]
    fn test_full_length_metadata_name_is_mapped() {
        let (site_map, subject_map) = maps();
        assert_eq!(
            anonymize_filename("PR-PR00001-metadata.csv", &site_map, &subject_map),
            Ok("AB-AB12345-metadata.csv".to_string())
        );
    }

    #[test]
    fn test_unsplittable_name_is_rejected() {
        let (site_map, subject_map) = maps();
        assert_eq!(
            anonymize_filename("notes.csv", &site_map, &subject_map),
            Err(FilenameError::Unsplittable("notes.csv".to_string()))
        );
    }

    #[test]
    fn test_unknown_site_is_rejected() {
        let (site_map, subject_map) = maps();
        let err = anonymize_filename("ZZ-PR00001-visit.csv", &site_map, &subject_map).unwrap_err();
        assert!(matches!(err, FilenameError::UnknownSite { .. }));
    }

    #[test]
    fn test_unknown_subject_is_rejected() {
        let (site_map, subject_map) = maps();
        let err = anonymize_filename("PR-PR99999-visit.csv", &site_map, &subject_map).unwrap_err();
        assert!(matches!(err, FilenameError::UnknownSubject { .. }));
    }

    #[test]
    fn test_filename_subject_extraction() {
        assert_eq!(
            filename_subject("PR-PR00001-visit.csv"),
            Some("PR00001".to_string())
        );
        assert_eq!(filename_subject("notes.csv"), None);
    }
}
