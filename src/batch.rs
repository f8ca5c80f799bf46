//! Batch processing
//!
//! Runs many independent comparisons at once. Inputs at or above
//! [`PARALLEL_THRESHOLD`] are spread over the rayon thread pool; smaller
//! inputs stay on the calling thread. Results always follow input order.
//!
//! Every function takes an optional [`NormalizationMode`] applied to each
//! string before it is compared or encoded.

use crate::algorithms::levenshtein::{weighted_levenshtein, EditCosts};
use crate::algorithms::normalize::{maybe_normalize, NormalizationMode};
use crate::algorithms::phonetic::soundex;
use crate::algorithms::similar_text::{similar_text, SimilarTextScore};
use crate::error::{Error, Result};
use ahash::AHashMap;
use rayon::prelude::*;

/// Minimum number of comparisons for parallel processing.
///
/// Below this, thread pool coordination costs more than it saves.
pub const PARALLEL_THRESHOLD: usize = 100;

fn check_lengths<S>(left: &[S], right: &[S]) -> Result<()> {
    if left.len() != right.len() {
        return Err(Error::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Apply `f` to each aligned pair, in parallel for large inputs.
fn map_pairs<S, T, F>(left: &[S], right: &[S], normalize: Option<NormalizationMode>, f: F) -> Vec<T>
where
    S: AsRef<str> + Sync,
    T: Send,
    F: Fn(&str, &str) -> T + Sync + Send,
{
    let compare = |a: &S, b: &S| {
        let a = maybe_normalize(a.as_ref(), normalize);
        let b = maybe_normalize(b.as_ref(), normalize);
        f(&a, &b)
    };

    if left.len() >= PARALLEL_THRESHOLD {
        left.par_iter()
            .zip(right.par_iter())
            .map(|(a, b)| compare(a, b))
            .collect()
    } else {
        left.iter().zip(right).map(|(a, b)| compare(a, b)).collect()
    }
}

/// Weighted edit distance for each aligned pair `(left[i], right[i])`.
///
/// # Example
/// ```
/// use phpfuzz::algorithms::EditCosts;
/// use phpfuzz::batch::levenshtein_pairs;
///
/// let left = ["golang", "kitten"];
/// let right = ["google", "sitting"];
/// let dists = levenshtein_pairs(&left, &right, &EditCosts::UNIT, None).unwrap();
/// assert_eq!(dists, vec![4, 3]);
/// ```
pub fn levenshtein_pairs<S: AsRef<str> + Sync>(
    left: &[S],
    right: &[S],
    costs: &EditCosts,
    normalize: Option<NormalizationMode>,
) -> Result<Vec<usize>> {
    check_lengths(left, right)?;
    tracing::debug!(
        pairs = left.len(),
        parallel = left.len() >= PARALLEL_THRESHOLD,
        "weighted levenshtein batch"
    );

    Ok(map_pairs(left, right, normalize, |a, b| {
        weighted_levenshtein(a, b, costs)
    }))
}

/// `similar_text` for each aligned pair `(left[i], right[i])`.
pub fn similar_text_pairs<S: AsRef<str> + Sync>(
    left: &[S],
    right: &[S],
    normalize: Option<NormalizationMode>,
) -> Result<Vec<SimilarTextScore>> {
    check_lengths(left, right)?;
    tracing::debug!(
        pairs = left.len(),
        parallel = left.len() >= PARALLEL_THRESHOLD,
        "similar_text batch"
    );

    Ok(map_pairs(left, right, normalize, similar_text))
}

/// Distance from every query to every choice.
///
/// Row `i` holds the distances from `queries[i]`, in `choices` order.
#[must_use]
pub fn levenshtein_matrix<S: AsRef<str> + Sync>(
    queries: &[S],
    choices: &[S],
    costs: &EditCosts,
    normalize: Option<NormalizationMode>,
) -> Vec<Vec<usize>> {
    let cells = queries.len().saturating_mul(choices.len());
    let parallel = cells >= PARALLEL_THRESHOLD;
    tracing::debug!(
        queries = queries.len(),
        choices = choices.len(),
        parallel,
        "weighted levenshtein matrix"
    );

    // Choices are reused by every row, so normalize them once
    let choices: Vec<_> = choices
        .iter()
        .map(|c| maybe_normalize(c.as_ref(), normalize))
        .collect();

    let row = |query: &S| -> Vec<usize> {
        let query = maybe_normalize(query.as_ref(), normalize);
        choices
            .iter()
            .map(|choice| weighted_levenshtein(&query, choice, costs))
            .collect()
    };

    if parallel {
        queries.par_iter().map(row).collect()
    } else {
        queries.iter().map(row).collect()
    }
}

/// Soundex code of every word, in input order.
///
/// Words without letters map to an empty code.
#[must_use]
pub fn soundex_many<S: AsRef<str> + Sync>(
    words: &[S],
    normalize: Option<NormalizationMode>,
) -> Vec<String> {
    let parallel = words.len() >= PARALLEL_THRESHOLD;
    tracing::debug!(words = words.len(), parallel, "soundex batch");

    let encode = |w: &S| soundex(&maybe_normalize(w.as_ref(), normalize));

    if parallel {
        words.par_iter().map(encode).collect()
    } else {
        words.iter().map(encode).collect()
    }
}

/// Group words sharing a Soundex code.
///
/// Words without letters are left out. Within a group, words keep their
/// input order.
///
/// # Example
/// ```
/// use phpfuzz::batch::group_by_soundex;
///
/// let groups = group_by_soundex(&["Robert", "Rupert", "Rubin", "42"], None);
/// assert_eq!(groups["R163"], vec!["Robert", "Rupert"]);
/// assert_eq!(groups["R150"], vec!["Rubin"]);
/// assert_eq!(groups.len(), 2);
/// ```
#[must_use]
pub fn group_by_soundex<S: AsRef<str> + Sync>(
    words: &[S],
    normalize: Option<NormalizationMode>,
) -> AHashMap<String, Vec<String>> {
    let codes = soundex_many(words, normalize);

    let mut groups: AHashMap<String, Vec<String>> = AHashMap::new();
    for (word, code) in words.iter().zip(codes) {
        if code.is_empty() {
            continue;
        }
        groups
            .entry(code)
            .or_default()
            .push(word.as_ref().to_string());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{}", i % 7)).collect()
    }

    #[test]
    fn test_levenshtein_pairs() {
        let left = vec!["golang", "", "abc"];
        let right = vec!["google", "abc", ""];
        let dists = levenshtein_pairs(&left, &right, &EditCosts::new(2, 1, 3), None).unwrap();
        assert_eq!(dists, vec![4, 6, 9]);
    }

    #[test]
    fn test_levenshtein_pairs_normalized() {
        let left = ["Hello"];
        let right = ["hello"];
        assert_eq!(
            levenshtein_pairs(&left, &right, &EditCosts::UNIT, None).unwrap(),
            vec![1]
        );
        assert_eq!(
            levenshtein_pairs(&left, &right, &EditCosts::UNIT, Some(NormalizationMode::Lowercase))
                .unwrap(),
            vec![0]
        );
    }

    #[test]
    fn test_length_mismatch() {
        let err = levenshtein_pairs(&["a", "b"], &["a"], &EditCosts::UNIT, None).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { left: 2, right: 1 });

        let err = similar_text_pairs(&["a"], &[], None).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { left: 1, right: 0 });
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let left = words(PARALLEL_THRESHOLD * 2);
        let right: Vec<String> = left.iter().rev().cloned().collect();

        let batch = levenshtein_pairs(&left, &right, &EditCosts::UNIT, None).unwrap();
        let expected: Vec<usize> = left
            .iter()
            .zip(&right)
            .map(|(a, b)| weighted_levenshtein(a, b, &EditCosts::UNIT))
            .collect();
        assert_eq!(batch, expected);

        let scores = similar_text_pairs(&left, &right, None).unwrap();
        assert_eq!(scores.len(), left.len());
        assert_eq!(scores[0], similar_text(&left[0], &right[0]));
    }

    #[test]
    fn test_similar_text_pairs() {
        let scores = similar_text_pairs(&["golang", ""], &["google", ""], None).unwrap();
        assert_eq!(scores[0].matched, 3);
        assert_eq!(scores[0].percent, 50.0);
        assert_eq!(scores[1].matched, 0);
    }

    #[test]
    fn test_levenshtein_matrix() {
        let matrix = levenshtein_matrix(
            &["abc", "golang"],
            &["abc", "google", ""],
            &EditCosts::UNIT,
            None,
        );
        assert_eq!(matrix, vec![vec![0, 6, 3], vec![5, 4, 6]]);

        let big = words(20);
        let matrix = levenshtein_matrix(&big, &big, &EditCosts::UNIT, None);
        assert_eq!(matrix.len(), 20);
        assert!(matrix.iter().enumerate().all(|(i, row)| row[i] == 0));
    }

    #[test]
    fn test_soundex_many() {
        let codes = soundex_many(&["Heilbronn", "", "robert"], None);
        assert_eq!(codes, vec!["H416", "", "R163"]);

        // NFKD exposes the base letter of accented input
        let codes = soundex_many(&["\u{c9}mile"], Some(NormalizationMode::UnicodeNFKD));
        assert_eq!(codes, vec!["E540"]);
        assert_eq!(soundex_many(&["\u{c9}mile"], None), vec!["M400"]);
    }

    #[test]
    fn test_group_by_soundex_order() {
        let input = ["Smyth", "Robert", "Smith", "Rupert", "!!"];
        let groups = group_by_soundex(&input, None);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["S530"], vec!["Smyth", "Smith"]);
        assert_eq!(groups["R163"], vec!["Robert", "Rupert"]);
    }
}
