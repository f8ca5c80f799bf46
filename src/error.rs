//! Error types for the fallible edges of the crate.
//!
//! The similarity algorithms themselves are total functions. Errors only
//! arise when converting loosely-typed caller input (signed costs, mode
//! names) or when pairwise batch inputs do not line up.

use thiserror::Error;

/// Errors returned by conversions and batch helpers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A signed cost weight was below zero
    #[error("{operation} cost must be non-negative, got {value}")]
    NegativeCost {
        operation: &'static str,
        value: i64,
    },

    /// Normalization mode name was not recognised
    #[error(
        "Unknown normalization mode: '{0}'. Valid: lowercase, unicode_nfkd, remove_punctuation, remove_whitespace, strict"
    )]
    UnknownNormalization(String),

    /// Pairwise inputs of different length
    #[error("Pairwise inputs must have equal length, got {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
