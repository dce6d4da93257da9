//! Site map construction (pipeline stage 1)
//!
//! Every data-collection site named by the source tables gets a random,
//! unique 2-letter code. Site codes are never stored alongside their
//! originals anywhere except the persisted map, which stays outside the
//! output tree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::codegen::{IdGenerator, MAX_CODE_ATTEMPTS};
use crate::adapters::csv::read_table;
use crate::domain::errors::{MappingError, SourceError};
use crate::domain::ids::{SiteId, SubjectCode};
use crate::domain::maps::SiteMap;
use crate::domain::Result;

/// Builds the site map for a set of original site codes.
///
/// Each site receives a unique random 2-letter code; collisions against
/// already-assigned codes are retried up to [`MAX_CODE_ATTEMPTS`] times and
/// then treated as code-space exhaustion. With `skip` set, every site maps
/// to itself (non-blinded test runs). The `combined` passthrough is always
/// present.
///
/// # Errors
///
/// Returns [`MappingError::CodesExhausted`] if a unique code cannot be
/// assigned within the attempt cap.
pub fn build_site_map(
    sites: &BTreeSet<String>,
    skip: bool,
    generator: &mut IdGenerator,
) -> Result<SiteMap> {
    let mut map = SiteMap::new();

    if skip {
        tracing::info!("Skipping site map randomization, using identity mapping");
        for site in sites {
            map.insert(site.clone(), site.clone());
        }
        return Ok(map);
    }

    for site in sites {
        let code = assign_site_code(&map, generator)?;
        map.insert(site.clone(), code.into_inner());
    }

    Ok(map)
}

/// Generates a site code not yet present among the map's values.
fn assign_site_code(map: &SiteMap, generator: &mut IdGenerator) -> Result<SiteId> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = generator.site_code();
        if !map.contains_code(candidate.as_str()) {
            return Ok(candidate);
        }
    }
    Err(MappingError::CodesExhausted {
        kind: "site",
        attempts: MAX_CODE_ATTEMPTS,
    }
    .into())
}

/// Enumerates the distinct site codes declared by the given source tables.
///
/// Each source must carry a column whose name contains `subject`
/// (case-insensitive); sites are the 2-character prefixes of its distinct
/// values. Subject values too short to carry a site prefix are skipped with
/// a warning.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] for a missing source and
/// [`SourceError::MissingColumn`] when a source has no subject column.
pub fn collect_sites(sources: &[PathBuf]) -> Result<BTreeSet<String>> {
    let mut sites = BTreeSet::new();
    for source in sources {
        tracing::info!(source = %source.display(), "Reading sites from source");
        let found = sites_in_source(source)?;
        tracing::debug!(source = %source.display(), count = found.len(), "Sites found");
        sites.extend(found);
    }
    Ok(sites)
}

fn sites_in_source(path: &Path) -> Result<BTreeSet<String>> {
    let table = read_table(path)?;
    let subject_col =
        table
            .find_column_containing("subject")
            .ok_or_else(|| SourceError::MissingColumn {
                path: path.to_path_buf(),
                column: "subject".to_string(),
            })?;

    let mut sites = BTreeSet::new();
    for value in table.distinct_values(subject_col) {
        match SubjectCode::new(&value) {
            Ok(subject) if subject.site_prefix().chars().count() == 2 => {
                sites.insert(subject.site_prefix());
            }
            _ => {
                tracing::warn!(subject = %value, "Invalid subject, no site prefix");
            }
        }
    }
    Ok(sites)
}
