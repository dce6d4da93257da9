//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the two kinds of codes the
//! pipeline reasons about: generated anonymized site codes, and original
//! participant codes as they appear in source data. Keeping them distinct
//! prevents a raw data value from being used where an assigned pseudonym is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a full participant code: 2-character site prefix + 5 digits
pub const FULL_SUBJECT_CODE_LEN: usize = 7;

/// Anonymized site code newtype wrapper
///
/// A generated site code is exactly two ASCII uppercase letters drawn from
/// `A..=Z`. Skip-mode identity mappings bypass this type and keep the
/// original site strings.
///
/// # Examples
///
/// ```
/// use veil::domain::ids::SiteId;
/// use std::str::FromStr;
///
/// let site_id = SiteId::from_str("AB").unwrap();
/// assert_eq!(site_id.as_str(), "AB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId(String);

impl SiteId {
    /// Creates a new SiteId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The anonymized site code
    ///
    /// # Returns
    ///
    /// Returns `Ok(SiteId)` if the code is two ASCII uppercase letters,
    /// `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.len() != 2 || !id.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(format!(
                "Site code must be exactly 2 uppercase letters, got: '{id}'"
            ));
        }
        Ok(Self(id))
    }

    /// Creates a SiteId without validating
    ///
    /// Caller must guarantee the code was drawn from the site alphabet.
    pub(crate) fn new_unchecked(id: String) -> Self {
        Self(id)
    }

    /// Returns the site code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SiteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SiteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Original participant code newtype wrapper
///
/// A participant code as it appears in source data. Its first two characters
/// are the owning site's code; a *full* code is exactly
/// [`FULL_SUBJECT_CODE_LEN`] characters. Shorter values occur in pooled and
/// hand-edited files and are handled per call site (skipped during site
/// collection, fatal during subject assignment).
///
/// # Examples
///
/// ```
/// use veil::domain::ids::SubjectCode;
///
/// let code = SubjectCode::new("PR00001").unwrap();
/// assert_eq!(code.site_prefix(), "PR");
/// assert!(code.is_full_code());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectCode(String);

impl SubjectCode {
    /// Creates a new SubjectCode from a string
    ///
    /// # Arguments
    ///
    /// * `code` - The original participant code
    ///
    /// # Returns
    ///
    /// Returns `Ok(SubjectCode)` unless the value is empty or whitespace
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("Subject code cannot be empty".to_string());
        }
        Ok(Self(code))
    }

    /// Returns the subject code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the owning site's code: the first two characters
    ///
    /// Codes shorter than two characters return what they have; the caller
    /// decides whether that is a skip or a fatal consistency error.
    pub fn site_prefix(&self) -> String {
        self.0.chars().take(2).collect()
    }

    /// Returns true if this is a full `site + 5 digit` participant code
    pub fn is_full_code(&self) -> bool {
        self.0.chars().count() == FULL_SUBJECT_CODE_LEN
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubjectCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SubjectCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
