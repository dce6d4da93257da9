//! Persistence for the three pseudonym map files.
//!
//! Each pipeline stage persists its map as pretty-printed JSON under the
//! configured mappings root, and the next stage reloads it from disk. The
//! stages share nothing else, so they can run as separate invocations.
//!
//! Maps are serialized only after a build completes; a fatal error during a
//! build therefore never leaves a partial map file behind.

use std::path::{Path, PathBuf};

use crate::domain::errors::MappingError;
use crate::domain::maps::{DateOffsetMap, SiteMap, SubjectMap};
use crate::domain::{Result, VeilError};

/// Filename of the persisted site map
pub const SITE_MAP_FILE: &str = "site_mapping.json";
/// Filename of the persisted subject map
pub const SUBJECT_MAP_FILE: &str = "subject_mapping.json";
/// Filename of the persisted date-offset map
pub const DATE_MAP_FILE: &str = "subject_date_mapping.json";

/// Filesystem store for the persisted maps
#[derive(Debug, Clone)]
pub struct MapStore {
    root: PathBuf,
}

impl MapStore {
    /// Creates a store rooted at the configured mappings directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the persisted site map
    pub fn site_map_path(&self) -> PathBuf {
        self.root.join(SITE_MAP_FILE)
    }

    /// Path of the persisted subject map
    pub fn subject_map_path(&self) -> PathBuf {
        self.root.join(SUBJECT_MAP_FILE)
    }

    /// Path of the persisted date-offset map
    pub fn date_map_path(&self) -> PathBuf {
        self.root.join(DATE_MAP_FILE)
    }

    /// Persists the site map
    pub fn save_site_map(&self, map: &SiteMap) -> Result<()> {
        self.write_json(&self.site_map_path(), map)
    }

    /// Persists the subject map
    pub fn save_subject_map(&self, map: &SubjectMap) -> Result<()> {
        self.write_json(&self.subject_map_path(), map)
    }

    /// Persists the date-offset map
    pub fn save_date_map(&self, map: &DateOffsetMap) -> Result<()> {
        self.write_json(&self.date_map_path(), map)
    }

    /// Loads the persisted site map
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MapMissing`] naming the `site-map` stage when
    /// the file does not exist.
    pub fn load_site_map(&self) -> Result<SiteMap> {
        self.read_json(&self.site_map_path(), "site-map")
    }

    /// Loads the persisted subject map
    pub fn load_subject_map(&self) -> Result<SubjectMap> {
        self.read_json(&self.subject_map_path(), "subject-map")
    }

    /// Loads the persisted date-offset map
    pub fn load_date_map(&self) -> Result<DateOffsetMap> {
        self.read_json(&self.date_map_path(), "date-map")
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            VeilError::Io(format!(
                "Failed to create mappings directory {}: {e}",
                self.root.display()
            ))
        })?;

        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(path, json)
            .map_err(|e| VeilError::Io(format!("Failed to write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), "Wrote map file");
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &Path,
        stage: &'static str,
    ) -> Result<T> {
        if !path.exists() {
            return Err(MappingError::MapMissing {
                path: path.to_path_buf(),
                stage,
            }
            .into());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| VeilError::Io(format!("Failed to read {}: {e}", path.display())))?;
        let value = serde_json::from_str(&contents)?;
        Ok(value)
    }
}
