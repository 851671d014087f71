use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Replacement for every character the target filesystem rejects.
pub const REPLACEMENT_CHAR: char = '_';

/// Name used when nothing usable is left of the requested one.
pub const PLACEHOLDER_NAME: &str = "untitled";

/// Longest on-disk filename, in UTF-8 bytes, accepted by FAT and ext4.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Device names that Windows and FAT volumes refuse as a file stem.
pub const RESERVED_ALIASES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Whether `c` may appear in a filename on a FAT-compatible volume.
pub fn is_valid_char(c: char) -> bool {
    !c.is_control() && !matches!(c, '"' | '*' | '/' | ':' | '<' | '>' | '?' | '\\' | '|')
}

/// Whether the stem (text before the first `.`) is a reserved device alias.
///
/// `CON`, `con.txt` and `Nul.tar.gz` are all reserved; `console` is not.
pub fn is_reserved_alias(name: &str) -> bool {
    let stem = stem_of(name);
    RESERVED_ALIASES.iter().any(|r| r.eq_ignore_ascii_case(stem))
}

pub(crate) fn stem_of(name: &str) -> &str {
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

/// Unit in which name lengths are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMeasure {
    /// Unicode scalar values.
    Chars,
    /// Encoded UTF-8 bytes, the unit most filesystems limit.
    Utf8Bytes,
}

impl LengthMeasure {
    pub fn of_char(self, c: char) -> usize {
        match self {
            LengthMeasure::Chars => 1,
            LengthMeasure::Utf8Bytes => c.len_utf8(),
        }
    }

    pub fn of_str(self, s: &str) -> usize {
        match self {
            LengthMeasure::Chars => s.chars().count(),
            LengthMeasure::Utf8Bytes => s.len(),
        }
    }
}

/// Limits applied while building a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    /// Upper bound on the final name, counted in `measure` units.
    pub max_length: usize,
    pub measure: LengthMeasure,
    /// Highest disambiguation counter tried before giving up.
    pub max_attempts: u32,
}

impl NamingPolicy {
    /// Policy bounded by codepoint count instead of bytes.
    pub fn chars(max_length: usize) -> Self {
        Self {
            max_length,
            measure: LengthMeasure::Chars,
            ..Self::default()
        }
    }

    /// Length of the widest disambiguator this policy can produce, e.g. `" (999)"`.
    pub fn disambiguator_reserve(&self) -> usize {
        format!(" ({})", self.max_attempts).len()
    }

    /// Shortest `max_length` under which every counter still leaves room for a
    /// one-unit base, a dot and a one-unit extension.
    pub fn min_length(&self) -> usize {
        self.disambiguator_reserve() + 3
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_length < self.min_length() {
            return Err(PolicyError::TooShort {
                max_length: self.max_length,
                min: self.min_length(),
                max_attempts: self.max_attempts,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max_length {max_length} is too short for {max_attempts} attempts (need at least {min})")]
    TooShort {
        max_length: usize,
        min: usize,
        max_attempts: u32,
    },
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            max_length: MAX_FILENAME_BYTES,
            measure: LengthMeasure::Utf8Bytes,
            max_attempts: 999,
        }
    }
}
