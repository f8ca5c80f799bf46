//! Python bindings (`phpfuzz._core`)
//!
//! Thin wrappers over the Rust API. Costs arrive as signed Python ints and
//! are validated here, so the core never sees a negative weight. Batch
//! functions release the GIL while the rayon pool works.

use crate::algorithms::levenshtein::{weighted_levenshtein, EditCosts};
use crate::algorithms::normalize::{maybe_normalize, NormalizationMode};
use crate::algorithms::phonetic;
use crate::algorithms::similar_text as st;
use crate::batch;
use pyo3::create_exception;
use pyo3::prelude::*;
use std::collections::HashMap;

// Exception hierarchy:
//
// PhpFuzzError (base)
//   └── ValidationError - negative costs, unknown normalization, length mismatch
create_exception!(phpfuzz, PhpFuzzError, pyo3::exceptions::PyException);
create_exception!(phpfuzz, ValidationError, PhpFuzzError);

impl From<crate::Error> for PyErr {
    fn from(err: crate::Error) -> PyErr {
        ValidationError::new_err(err.to_string())
    }
}

fn parse_normalization(normalize: Option<&str>) -> PyResult<Option<NormalizationMode>> {
    Ok(normalize.map(str::parse::<NormalizationMode>).transpose()?)
}

fn parse_costs(insertion: i64, replacement: i64, deletion: i64) -> PyResult<EditCosts> {
    Ok(EditCosts::try_from_signed(insertion, replacement, deletion)?)
}

/// Weighted Levenshtein distance.
///
/// Raises `ValidationError` for negative costs.
#[pyfunction]
#[pyo3(signature = (a, b, insertion_cost=1, replacement_cost=1, deletion_cost=1, normalize=None))]
fn levenshtein(
    a: &str,
    b: &str,
    insertion_cost: i64,
    replacement_cost: i64,
    deletion_cost: i64,
    normalize: Option<&str>,
) -> PyResult<usize> {
    let costs = parse_costs(insertion_cost, replacement_cost, deletion_cost)?;
    let mode = parse_normalization(normalize)?;
    let a = maybe_normalize(a, mode);
    let b = maybe_normalize(b, mode);
    Ok(weighted_levenshtein(&a, &b, &costs))
}

/// Returns `(matched, percent)` like PHP's `similar_text` with its by-ref
/// percent argument.
#[pyfunction]
#[pyo3(signature = (a, b, normalize=None))]
fn similar_text(a: &str, b: &str, normalize: Option<&str>) -> PyResult<(usize, f64)> {
    let mode = parse_normalization(normalize)?;
    let a = maybe_normalize(a, mode);
    let b = maybe_normalize(b, mode);
    let score = st::similar_text(&a, &b);
    Ok((score.matched, score.percent))
}

#[pyfunction]
fn soundex(s: &str) -> String {
    phonetic::soundex(s)
}

#[pyfunction]
fn soundex_match(a: &str, b: &str) -> bool {
    phonetic::soundex_match(a, b)
}

#[pyfunction]
#[pyo3(signature = (left, right, insertion_cost=1, replacement_cost=1, deletion_cost=1, normalize=None))]
fn batch_levenshtein(
    py: Python<'_>,
    left: Vec<String>,
    right: Vec<String>,
    insertion_cost: i64,
    replacement_cost: i64,
    deletion_cost: i64,
    normalize: Option<&str>,
) -> PyResult<Vec<usize>> {
    let costs = parse_costs(insertion_cost, replacement_cost, deletion_cost)?;
    let mode = parse_normalization(normalize)?;
    Ok(py.allow_threads(|| batch::levenshtein_pairs(&left, &right, &costs, mode))?)
}

#[pyfunction]
#[pyo3(signature = (left, right, normalize=None))]
fn batch_similar_text(
    py: Python<'_>,
    left: Vec<String>,
    right: Vec<String>,
    normalize: Option<&str>,
) -> PyResult<Vec<(usize, f64)>> {
    let mode = parse_normalization(normalize)?;
    let scores = py.allow_threads(|| batch::similar_text_pairs(&left, &right, mode))?;
    Ok(scores.into_iter().map(|s| (s.matched, s.percent)).collect())
}

#[pyfunction]
#[pyo3(signature = (queries, choices, insertion_cost=1, replacement_cost=1, deletion_cost=1, normalize=None))]
fn levenshtein_matrix(
    py: Python<'_>,
    queries: Vec<String>,
    choices: Vec<String>,
    insertion_cost: i64,
    replacement_cost: i64,
    deletion_cost: i64,
    normalize: Option<&str>,
) -> PyResult<Vec<Vec<usize>>> {
    let costs = parse_costs(insertion_cost, replacement_cost, deletion_cost)?;
    let mode = parse_normalization(normalize)?;
    Ok(py.allow_threads(|| batch::levenshtein_matrix(&queries, &choices, &costs, mode)))
}

#[pyfunction]
#[pyo3(signature = (words, normalize=None))]
fn batch_soundex(py: Python<'_>, words: Vec<String>, normalize: Option<&str>) -> PyResult<Vec<String>> {
    let mode = parse_normalization(normalize)?;
    Ok(py.allow_threads(|| batch::soundex_many(&words, mode)))
}

#[pyfunction]
#[pyo3(signature = (words, normalize=None))]
fn group_by_soundex(
    py: Python<'_>,
    words: Vec<String>,
    normalize: Option<&str>,
) -> PyResult<HashMap<String, Vec<String>>> {
    let mode = parse_normalization(normalize)?;
    let groups = py.allow_threads(|| batch::group_by_soundex(&words, mode));
    Ok(groups.into_iter().collect())
}

#[pymodule]
fn _core(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("PhpFuzzError", py.get_type::<PhpFuzzError>())?;
    m.add("ValidationError", py.get_type::<ValidationError>())?;

    m.add_function(wrap_pyfunction!(levenshtein, m)?)?;
    m.add_function(wrap_pyfunction!(similar_text, m)?)?;
    m.add_function(wrap_pyfunction!(soundex, m)?)?;
    m.add_function(wrap_pyfunction!(soundex_match, m)?)?;

    m.add_function(wrap_pyfunction!(batch_levenshtein, m)?)?;
    m.add_function(wrap_pyfunction!(batch_similar_text, m)?)?;
    m.add_function(wrap_pyfunction!(levenshtein_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(batch_soundex, m)?)?;
    m.add_function(wrap_pyfunction!(group_by_soundex, m)?)?;

    Ok(())
}
