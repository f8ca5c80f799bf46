//! String normalization utilities
//!
//! Optional preprocessing applied before comparison, so that e.g. case or
//! accents do not count as edits.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Normalization mode for string preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Convert to lowercase only
    Lowercase,
    /// Apply Unicode NFKD normalization
    #[serde(rename = "unicode_nfkd", alias = "nfkd")]
    UnicodeNFKD,
    /// Remove punctuation characters
    RemovePunctuation,
    /// Remove all whitespace
    RemoveWhitespace,
    /// Apply all normalizations
    Strict,
}

impl FromStr for NormalizationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lowercase" => Ok(Self::Lowercase),
            "unicode_nfkd" | "nfkd" => Ok(Self::UnicodeNFKD),
            "remove_punctuation" => Ok(Self::RemovePunctuation),
            "remove_whitespace" => Ok(Self::RemoveWhitespace),
            "strict" => Ok(Self::Strict),
            _ => Err(Error::UnknownNormalization(s.to_string())),
        }
    }
}

/// Normalize a string according to the specified mode
#[must_use]
pub fn normalize_string(s: &str, mode: NormalizationMode) -> String {
    match mode {
        NormalizationMode::Lowercase => s.to_lowercase(),
        NormalizationMode::UnicodeNFKD => s.nfkd().collect::<String>(),
        NormalizationMode::RemovePunctuation => {
            s.chars().filter(|c| !c.is_ascii_punctuation()).collect()
        }
        NormalizationMode::RemoveWhitespace => s.chars().filter(|c| !c.is_whitespace()).collect(),
        NormalizationMode::Strict => s
            .nfkd()
            .collect::<String>()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
            .collect(),
    }
}

/// Normalize both strings according to the specified mode
#[must_use]
pub fn normalize_pair(a: &str, b: &str, mode: NormalizationMode) -> (String, String) {
    (normalize_string(a, mode), normalize_string(b, mode))
}

/// Apply an optional mode, borrowing the input untouched when there is none.
#[must_use]
pub fn maybe_normalize(s: &str, mode: Option<NormalizationMode>) -> Cow<'_, str> {
    match mode {
        None => Cow::Borrowed(s),
        Some(mode) => Cow::Owned(normalize_string(s, mode)),
    }
}
