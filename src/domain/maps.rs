//! Typed pseudonym and offset maps
//!
//! The three persisted maps are distinct types rather than bare string
//! dictionaries, so a site map can never be handed to code expecting a
//! subject map. This matters because the subject map deliberately absorbs
//! every site-map entry (one lookup table resolves either kind of code) and
//! the two would otherwise be easy to swap.
//!
//! All three serialize transparently as plain JSON objects with sorted keys,
//! which keeps the on-disk artifacts stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Passthrough entry present in every site map
///
/// Pooled cross-site files use this literal in place of a site code; it maps
/// to itself so such files survive anonymization with their grouping intact.
pub const COMBINED: &str = "combined";

/// Mapping from original site codes to anonymized site codes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteMap {
    entries: BTreeMap<String, String>,
}

impl SiteMap {
    /// Creates an empty site map containing only the `combined` passthrough
    pub fn new() -> Self {
        let mut map = Self {
            entries: BTreeMap::new(),
        };
        map.insert(COMBINED, COMBINED);
        map
    }

    /// Inserts a site mapping, replacing any previous entry
    pub fn insert(&mut self, site: impl Into<String>, code: impl Into<String>) {
        self.entries.insert(site.into(), code.into());
    }

    /// Looks up the anonymized code for an original site
    pub fn get(&self, site: &str) -> Option<&str> {
        self.entries.get(site).map(String::as_str)
    }

    /// Returns true if the site has an entry
    pub fn contains_site(&self, site: &str) -> bool {
        self.entries.contains_key(site)
    }

    /// Returns true if the anonymized code is already assigned
    ///
    /// Used by the collision-retry loop during generation; the maps are small
    /// enough that a value scan is fine.
    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.values().any(|v| v == code)
    }

    /// Number of entries (including the `combined` passthrough)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(original, anonymized)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}

/// Mapping from original subject codes to anonymized subject codes
///
/// A superset table: after subject assignment it also carries the fixed
/// organizational passthrough labels and a copy of every site-map entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectMap {
    entries: BTreeMap<String, String>,
}

impl SubjectMap {
    /// Creates an empty subject map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a subject mapping, replacing any previous entry
    pub fn insert(&mut self, subject: impl Into<String>, code: impl Into<String>) {
        self.entries.insert(subject.into(), code.into());
    }

    /// Looks up the anonymized code for an original subject
    pub fn get(&self, subject: &str) -> Option<&str> {
        self.entries.get(subject).map(String::as_str)
    }

    /// Returns true if the subject has an entry
    pub fn contains_subject(&self, subject: &str) -> bool {
        self.entries.contains_key(subject)
    }

    /// Returns true if the anonymized code is already assigned
    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.values().any(|v| v == code)
    }

    /// Copies every site-map entry into this map
    ///
    /// Filenames and pooled tables mix site and subject codes; absorbing the
    /// site map means a single lookup resolves both.
    pub fn absorb_sites(&mut self, site_map: &SiteMap) {
        for (site, code) in site_map.iter() {
            self.entries.insert(site.clone(), code.clone());
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(original, anonymized)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}

/// Mapping from original subject codes to signed day offsets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateOffsetMap {
    entries: BTreeMap<String, i64>,
}

impl DateOffsetMap {
    /// Creates an empty offset map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an offset, replacing any previous entry
    pub fn insert(&mut self, subject: impl Into<String>, days: i64) {
        self.entries.insert(subject.into(), days);
    }

    /// Inserts an offset only if the subject has none yet
    ///
    /// Within a single source the first declared row for a subject wins.
    pub fn insert_if_absent(&mut self, subject: impl Into<String>, days: i64) {
        self.entries.entry(subject.into()).or_insert(days);
    }

    /// Merges another map into this one, overwriting on conflict
    pub fn extend_overwrite(&mut self, other: DateOffsetMap) {
        self.entries.extend(other.entries);
    }

    /// Looks up the day offset for a subject
    pub fn get(&self, subject: &str) -> Option<i64> {
        self.entries.get(subject).copied()
    }

    /// Returns true if the subject has an offset
    pub fn contains_subject(&self, subject: &str) -> bool {
        self.entries.contains_key(subject)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(subject, days)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.entries.iter()
    }
}
