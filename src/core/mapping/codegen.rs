//! Random code generation for pseudonym assignment
//!
//! All randomness in the pipeline flows through [`IdGenerator`], a seedable
//! `StdRng` wrapper. Production runs seed from entropy; tests and
//! reproducible runs pass an explicit seed through configuration.

use crate::domain::ids::SiteId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound on collision retries for a single code assignment
///
/// The 2-letter site space holds 676 codes and the 5-digit subject suffix
/// space 59049 per site; hitting this bound means the space is effectively
/// exhausted, and looping further would never terminate.
pub const MAX_CODE_ATTEMPTS: usize = 1000;

/// Alphabet for anonymized site codes
const SITE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Digits for anonymized subject suffixes; 0 is excluded so codes never
/// carry an ambiguous leading zero
const SUFFIX_DIGITS: &[u8] = b"123456789";

/// Length of a subject suffix
const SUFFIX_LEN: usize = 5;

/// Candidate day offsets for addon subjects
pub const ADDON_OFFSETS: [i64; 4] = [-14, -7, 7, 14];

/// Seedable random generator for pseudonymous codes and addon offsets
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Creates a generator from an optional seed
    ///
    /// `None` seeds from OS entropy; `Some(seed)` produces a fully
    /// reproducible assignment sequence.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Creates a generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic generator from an explicit seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a candidate 2-letter site code
    pub fn site_code(&mut self) -> SiteId {
        let code: String = (0..2)
            .map(|_| SITE_ALPHABET[self.rng.gen_range(0..SITE_ALPHABET.len())] as char)
            .collect();
        SiteId::new_unchecked(code)
    }

    /// Generates a candidate 5-digit subject suffix using digits 1-9
    pub fn subject_suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| SUFFIX_DIGITS[self.rng.gen_range(0..SUFFIX_DIGITS.len())] as char)
            .collect()
    }

    /// Draws a day offset for an addon subject from the fixed candidate set
    pub fn addon_offset(&mut self) -> i64 {
        ADDON_OFFSETS[self.rng.gen_range(0..ADDON_OFFSETS.len())]
    }
}
