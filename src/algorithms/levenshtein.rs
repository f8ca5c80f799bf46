//! Weighted Levenshtein (edit) distance
//!
//! Wagner-Fischer dynamic programming with caller-supplied costs for
//! insertion, replacement and deletion, matching PHP's
//! `levenshtein($a, $b, $ins, $rep, $del)`.
//!
//! - Unicode-aware: operates on code points, not bytes
//! - Optional grapheme cluster mode
//! - Saturating arithmetic, so huge weights never overflow
//!
//! # Complexity
//! - Time: O(m*n) where m and n are code point counts
//! - Space: O(n) using two DP rows
//!
//! There is no length cap. Inputs of a few thousand code points are fine;
//! past that the quadratic time becomes the caller's concern.

use super::EditDistance;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

/// Table size (in cells) above which a trace event is emitted
pub const LARGE_TABLE_CELLS: usize = 1_000_000;

// ============================================================================
// Cost Vector
// ============================================================================

/// Per-operation weights for the edit distance.
///
/// `Default` is the classic unit-cost metric (`1, 1, 1`).
///
/// # Example
/// ```
/// use phpfuzz::algorithms::levenshtein::EditCosts;
///
/// let costs = EditCosts::default().with_replace(2);
/// assert_eq!(costs, EditCosts::new(1, 2, 1));
/// assert!(costs.is_symmetric());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditCosts {
    /// Cost of inserting one code point into `a`
    pub insert: usize,
    /// Cost of replacing one code point of `a` with one of `b`
    pub replace: usize,
    /// Cost of deleting one code point from `a`
    pub delete: usize,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self::UNIT
    }
}

impl EditCosts {
    /// Unit costs: plain Levenshtein distance
    pub const UNIT: Self = Self {
        insert: 1,
        replace: 1,
        delete: 1,
    };

    #[must_use]
    pub const fn new(insert: usize, replace: usize, delete: usize) -> Self {
        Self {
            insert,
            replace,
            delete,
        }
    }

    /// Same cost for every operation
    #[must_use]
    pub const fn uniform(cost: usize) -> Self {
        Self::new(cost, cost, cost)
    }

    #[must_use]
    pub const fn with_insert(mut self, insert: usize) -> Self {
        self.insert = insert;
        self
    }

    #[must_use]
    pub const fn with_replace(mut self, replace: usize) -> Self {
        self.replace = replace;
        self
    }

    #[must_use]
    pub const fn with_delete(mut self, delete: usize) -> Self {
        self.delete = delete;
        self
    }

    /// Insertion and deletion cost the same, so `d(a, b) == d(b, a)`.
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        self.insert == self.delete
    }

    /// Build costs from signed weights, rejecting negatives.
    ///
    /// # Example
    /// ```
    /// use phpfuzz::algorithms::levenshtein::EditCosts;
    ///
    /// assert_eq!(EditCosts::try_from_signed(1, 2, 3).unwrap(), EditCosts::new(1, 2, 3));
    /// assert!(EditCosts::try_from_signed(1, -1, 1).is_err());
    /// ```
    pub fn try_from_signed(insert: i64, replace: i64, delete: i64) -> Result<Self> {
        Ok(Self {
            insert: non_negative("insertion", insert)?,
            replace: non_negative("replacement", replace)?,
            delete: non_negative("deletion", delete)?,
        })
    }

    /// Cost of the cheaper of two trivial edit scripts turning an `m`-long
    /// sequence into an `n`-long one. Always >= the real distance.
    fn upper_bound(&self, m: usize, n: usize) -> usize {
        let rewrite_all = m
            .saturating_mul(self.delete)
            .saturating_add(n.saturating_mul(self.insert));

        let tail = if n > m {
            (n - m).saturating_mul(self.insert)
        } else {
            (m - n).saturating_mul(self.delete)
        };
        let replace_then_pad = m.min(n).saturating_mul(self.replace).saturating_add(tail);

        rewrite_all.min(replace_then_pad)
    }
}

impl TryFrom<[i64; 3]> for EditCosts {
    type Error = Error;

    /// Order is `[insert, replace, delete]`, as in PHP's argument list.
    fn try_from([insert, replace, delete]: [i64; 3]) -> Result<Self> {
        Self::try_from_signed(insert, replace, delete)
    }
}

fn non_negative(operation: &'static str, value: i64) -> Result<usize> {
    if value < 0 {
        return Err(Error::NegativeCost { operation, value });
    }
    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}

// ============================================================================
// Dynamic Programming Core
// ============================================================================

/// Weighted edit distance over arbitrary comparable slices.
///
/// Row `i` of the table holds `D[i][*]`; only two rows are live at a time.
/// `D[0][j] = j * insert`, `D[i][0] = i * delete`.
#[must_use]
pub fn weighted_distance_slices<T: PartialEq>(a: &[T], b: &[T], costs: &EditCosts) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n.saturating_mul(costs.insert);
    }
    if n == 0 {
        return m.saturating_mul(costs.delete);
    }

    if m.saturating_mul(n) > LARGE_TABLE_CELLS {
        tracing::trace!(rows = m + 1, cols = n + 1, "large edit distance table");
    }

    let mut prev: SmallVec<[usize; 64]> = (0..=n).map(|j| j.saturating_mul(costs.insert)).collect();
    let mut curr: SmallVec<[usize; 64]> = SmallVec::from_elem(0, n + 1);

    for i in 1..=m {
        curr[0] = i.saturating_mul(costs.delete);

        for j in 1..=n {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1]
            } else {
                let deletion = prev[j].saturating_add(costs.delete);
                let insertion = curr[j - 1].saturating_add(costs.insert);
                let replacement = prev[j - 1].saturating_add(costs.replace);
                deletion.min(insertion).min(replacement)
            };
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

fn normalized_similarity(dist: usize, m: usize, n: usize, costs: &EditCosts) -> f64 {
    let bound = costs.upper_bound(m, n);
    if bound == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / bound as f64)
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Weighted Levenshtein calculator
///
/// # Complexity
/// - Time: O(m*n)
/// - Space: O(n)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedLevenshtein {
    pub costs: EditCosts,
}

impl WeightedLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_costs(costs: EditCosts) -> Self {
        Self { costs }
    }

    #[must_use]
    pub fn compute(&self, a: &str, b: &str) -> usize {
        weighted_levenshtein(a, b, &self.costs)
    }
}

impl EditDistance for WeightedLevenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        weighted_levenshtein(a, b, &self.costs)
    }

    /// Normalizes by the cheaper trivial edit script, which is `max(m, n)`
    /// under unit costs.
    fn similarity(&self, a: &str, b: &str) -> f64 {
        weighted_levenshtein_similarity(a, b, &self.costs)
    }

    fn name(&self) -> &'static str {
        "weighted_levenshtein"
    }
}

/// Minimum total cost to turn `a` into `b`.
///
/// Arguments follow PHP's order: insertion, replacement, deletion.
///
/// # Example
/// ```
/// use phpfuzz::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("golang", "google", 1, 1, 1), 4);
/// assert_eq!(levenshtein("", "abc", 2, 1, 1), 6);
/// assert_eq!(levenshtein("abc", "", 1, 1, 3), 9);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str, insert: usize, replace: usize, delete: usize) -> usize {
    weighted_levenshtein(a, b, &EditCosts::new(insert, replace, delete))
}

/// Minimum total cost to turn `a` into `b` under `costs`.
#[must_use]
pub fn weighted_levenshtein(a: &str, b: &str, costs: &EditCosts) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    weighted_distance_slices(&a_chars, &b_chars, costs)
}

/// Weighted distance normalized into a similarity score (0.0 to 1.0)
#[must_use]
pub fn weighted_levenshtein_similarity(a: &str, b: &str, costs: &EditCosts) -> f64 {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    let dist = weighted_distance_slices(&a_chars, &b_chars, costs);
    normalized_similarity(dist, a_chars.len(), b_chars.len(), costs)
}

// ============================================================================
// Grapheme Cluster Mode
// ============================================================================

/// Weighted distance treating grapheme clusters as single units.
///
/// # Examples
/// ```
/// use phpfuzz::algorithms::levenshtein::{levenshtein_grapheme, weighted_levenshtein, EditCosts};
///
/// // 👨‍👩‍👧‍👦 is 7 code points but 1 grapheme cluster
/// let family = "👨‍👩‍👧‍👦";
/// let man = "👨";
///
/// assert_eq!(levenshtein_grapheme(family, man, &EditCosts::UNIT), 1);
/// assert_eq!(weighted_levenshtein(family, man, &EditCosts::UNIT), 6);
/// ```
#[must_use]
pub fn levenshtein_grapheme(a: &str, b: &str, costs: &EditCosts) -> usize {
    if a == b {
        return 0;
    }

    let a_graphemes: SmallVec<[&str; 64]> = a.graphemes(true).collect();
    let b_graphemes: SmallVec<[&str; 64]> = b.graphemes(true).collect();

    weighted_distance_slices(&a_graphemes, &b_graphemes, costs)
}
