//! phpfuzz - PHP-compatible string similarity
//!
//! Reproduces three PHP string built-ins with their exact observable
//! behaviour, over Unicode code points instead of bytes:
//!
//! - `levenshtein` with custom insertion/replacement/deletion costs
//! - `similar_text`, including its match count and percentage
//! - `soundex`
//!
//! # Features
//! - Pure, allocation-light functions, safe to call from any thread
//! - Grapheme cluster variants for emoji and combining marks
//! - Parallel batch processing
//! - Python bindings behind the `python` feature
//!
//! # Example
//! ```
//! use phpfuzz::{levenshtein, similar_text, soundex};
//!
//! assert_eq!(levenshtein("golang", "google", 1, 1, 1), 4);
//!
//! let score = similar_text("golang", "google");
//! assert_eq!((score.matched, score.percent), (3, 50.0));
//!
//! assert_eq!(soundex("Heilbronn"), "H416");
//! ```

pub mod algorithms;
pub mod batch;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use algorithms::normalize::{normalize_pair, normalize_string, NormalizationMode};
pub use algorithms::{
    levenshtein, levenshtein_grapheme, similar_text, similar_text_grapheme, soundex,
    soundex_match, weighted_levenshtein, EditCosts, EditDistance, Similarity, SimilarText,
    SimilarTextScore, Soundex, WeightedLevenshtein,
};
pub use error::{Error, Result};
