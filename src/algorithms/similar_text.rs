//! Common-substring similarity (PHP `similar_text`)
//!
//! Finds the longest common substring, then repeats the search on the pieces
//! to its left and to its right, summing every matched run. The result is
//! NOT the longest common subsequence: the greedy split can miss matches
//! that cross the first run, and swapping the arguments may change the
//! result.
//!
//! The scan order and tie-break are fixed. Candidate runs are visited with
//! the position in `a` as the outer loop and the position in `b` as the
//! inner loop, and a later run only replaces the current best when it is
//! strictly longer. Existing expected values depend on this exact choice.
//!
//! # Complexity
//! - Time: O(m*n*k) per level, where k is the run length being extended
//! - Space: O(m + n) for the code points plus a small work stack

use super::Similarity;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use unicode_segmentation::UnicodeSegmentation;

/// Outcome of a `similar_text` comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarTextScore {
    /// Total length of all matched runs, in code points
    pub matched: usize,
    /// `matched * 200 / (len(a) + len(b))`, or 0 when both are empty
    pub percent: f64,
}

impl SimilarTextScore {
    /// Derive the percentage from the total and the original lengths.
    #[must_use]
    pub fn from_lengths(matched: usize, len_a: usize, len_b: usize) -> Self {
        let total = len_a + len_b;
        let percent = if total == 0 {
            0.0
        } else {
            (matched * 200) as f64 / total as f64
        };
        Self { matched, percent }
    }

    /// Percentage scaled to 0.0..=1.0
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.percent / 100.0
    }
}

/// A matched run: `a[a_start..a_start + len] == b[b_start..b_start + len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CommonRun {
    a_start: usize,
    b_start: usize,
    len: usize,
}

/// First longest common run in scan order, or `None` if nothing matches.
fn first_longest_run<T: PartialEq>(a: &[T], b: &[T]) -> Option<CommonRun> {
    let mut best: Option<CommonRun> = None;
    let mut best_len = 0;

    for i in 0..a.len() {
        // Nothing starting here or later can be strictly longer
        if a.len() - i <= best_len {
            break;
        }

        for j in 0..b.len() {
            if b.len() - j <= best_len {
                break;
            }

            let len = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();

            if len > best_len {
                best_len = len;
                best = Some(CommonRun {
                    a_start: i,
                    b_start: j,
                    len,
                });
            }
        }
    }

    best
}

/// Total matched length over arbitrary comparable slices.
///
/// The left and right remainders of every split are independent, so they
/// are processed from a work stack rather than by recursion; the sum is the
/// same and deep inputs cannot overflow the call stack.
#[must_use]
pub fn similar_text_slices<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut total = 0;
    let mut pending: SmallVec<[(&[T], &[T]); 16]> = smallvec![(a, b)];

    while let Some((a, b)) = pending.pop() {
        if a.is_empty() || b.is_empty() {
            continue;
        }

        let Some(run) = first_longest_run(a, b) else {
            continue;
        };

        total += run.len;
        pending.push((&a[..run.a_start], &b[..run.b_start]));
        pending.push((&a[run.a_start + run.len..], &b[run.b_start + run.len..]));
    }

    total
}

/// `similar_text` calculator
///
/// Stateless calculator - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimilarText;

impl SimilarText {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> SimilarTextScore {
        similar_text(a, b)
    }
}

impl Similarity for SimilarText {
    /// Percentage scaled to 0.0..=1.0. Two empty strings score 0.0.
    fn similarity(&self, a: &str, b: &str) -> f64 {
        similar_text(a, b).ratio()
    }

    fn name(&self) -> &'static str {
        "similar_text"
    }
}

/// Compare two strings the way PHP's `similar_text` does.
///
/// # Examples
/// ```
/// use phpfuzz::algorithms::similar_text::similar_text;
///
/// let score = similar_text("golang", "google");
/// assert_eq!(score.matched, 3);
/// assert_eq!(score.percent, 50.0);
///
/// // Argument order matters
/// assert_eq!(similar_text("bafoobar", "barfoo").matched, 5);
/// assert_eq!(similar_text("barfoo", "bafoobar").matched, 3);
/// ```
#[must_use]
pub fn similar_text(a: &str, b: &str) -> SimilarTextScore {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    let matched = similar_text_slices(&a_chars, &b_chars);
    SimilarTextScore::from_lengths(matched, a_chars.len(), b_chars.len())
}

/// `similar_text` over grapheme clusters instead of code points.
#[must_use]
pub fn similar_text_grapheme(a: &str, b: &str) -> SimilarTextScore {
    let a_graphemes: SmallVec<[&str; 64]> = a.graphemes(true).collect();
    let b_graphemes: SmallVec<[&str; 64]> = b.graphemes(true).collect();

    let matched = similar_text_slices(&a_graphemes, &b_graphemes);
    SimilarTextScore::from_lengths(matched, a_graphemes.len(), b_graphemes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_similar_text_basic() {
        let score = similar_text("golang", "google");
        assert_eq!(score.matched, 3);
        assert_eq!(score.percent, 50.0);

        let score = similar_text("World", "Word");
        assert_eq!(score.matched, 4);
        assert_eq!(score.percent, 800.0 / 9.0);
    }

    #[test]
    fn test_similar_text_percent_divides_last() {
        // Scaling before the division keeps the last bit identical to PHP
        let score = similar_text("ab", "a");
        assert_eq!(score.matched, 1);
        assert_eq!(score.percent, 200.0 / 3.0);
        assert_ne!(score.percent, 2.0 / 3.0 * 100.0);

        for (matched, len_a, len_b) in [(1, 2, 1), (2, 5, 2), (3, 7, 4), (5, 11, 9)] {
            let score = SimilarTextScore::from_lengths(matched, len_a, len_b);
            assert_eq!(score.percent, (matched * 200) as f64 / (len_a + len_b) as f64);
        }
    }

    #[test]
    fn test_similar_text_empty() {
        assert_eq!(
            similar_text("", ""),
            SimilarTextScore {
                matched: 0,
                percent: 0.0
            }
        );
        assert_eq!(similar_text("abc", "").matched, 0);
        assert_eq!(similar_text("", "abc").percent, 0.0);
        assert_eq!(similar_text("abc", "xyz").matched, 0);
    }

    #[test]
    fn test_similar_text_identity() {
        let score = similar_text("Heilbronn", "Heilbronn");
        assert_eq!(score.matched, 9);
        assert_eq!(score.percent, 100.0);
    }

    #[test]
    fn test_similar_text_first_longest_wins() {
        // "foo" (a[2], b[3]) is found before the equally long "bar" (a[5], b[0])
        let score = similar_text("bafoobar", "barfoo");
        assert_eq!(score.matched, 5);
        assert_eq!(score.percent, 1000.0 / 14.0);

        // Swapped: "bar" at a[0] is found first and "foo" is lost
        let score = similar_text("barfoo", "bafoobar");
        assert_eq!(score.matched, 3);
        assert_eq!(score.percent, 600.0 / 14.0);
    }

    #[test]
    fn test_first_longest_run_tie_break() {
        let a: Vec<char> = "abxab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(
            first_longest_run(&a, &b),
            Some(CommonRun {
                a_start: 0,
                b_start: 0,
                len: 2
            })
        );

        let a: Vec<char> = "xa".chars().collect();
        let b: Vec<char> = "aa".chars().collect();
        assert_eq!(
            first_longest_run(&a, &b),
            Some(CommonRun {
                a_start: 1,
                b_start: 0,
                len: 1
            })
        );

        assert_eq!(first_longest_run::<char>(&[], &['a']), None);
    }

    #[test]
    fn test_similar_text_unicode() {
        let score = similar_text("简体中文", "简体");
        assert_eq!(score.matched, 2);
        assert_eq!(score.percent, 400.0 / 6.0);
    }

    #[test]
    fn test_similar_text_grapheme() {
        // One grapheme each, and they differ
        assert_eq!(similar_text_grapheme("e\u{301}", "e").matched, 0);
        // Code point mode matches the base letter
        assert_eq!(similar_text("e\u{301}", "e").matched, 1);
    }

    #[test]
    fn test_similarity_trait() {
        let st = SimilarText::new();
        assert_eq!(st.similarity("golang", "google"), 0.5);
        assert_eq!(st.similarity("", ""), 0.0);
        assert_eq!(st.name(), "similar_text");
        assert_eq!(st.compare("abc", "abc").matched, 3);
    }

    #[test]
    fn test_score_serde() {
        let score = similar_text("golang", "google");
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, r#"{"matched":3,"percent":50.0}"#);
    }

    fn arb_string() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-d]{0,16}").unwrap()
    }

    proptest! {
        #[test]
        fn prop_identity(s in "[a-z]{1,20}") {
            let score = similar_text(&s, &s);
            prop_assert_eq!(score.matched, s.chars().count());
            prop_assert_eq!(score.percent, 100.0);
        }

        #[test]
        fn prop_bounded_by_shorter(a in arb_string(), b in arb_string()) {
            let score = similar_text(&a, &b);
            prop_assert!(score.matched <= a.len().min(b.len()));
            prop_assert!((0.0..=100.0).contains(&score.percent));
        }
    }
}
