//! Soundex phonetic encoding
//!
//! Encodes a word by how it sounds: the first letter followed by three
//! digits for the consonant classes that follow it. Words that sound alike
//! ("Robert", "Rupert") share a code.
//!
//! Only ASCII letters take part. Digits, punctuation, whitespace and
//! non-ASCII letters are skipped.

use super::Similarity;

/// Length of every non-empty Soundex code
pub const SOUNDEX_LEN: usize = 4;

/// Soundex phonetic encoder
///
/// Produces a 4-character code: first letter + 3 digits.
/// Stateless encoder - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Soundex;

impl Soundex {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode a string to its Soundex code
    #[must_use]
    pub fn encode(&self, s: &str) -> String {
        soundex(s)
    }
}

impl Similarity for Soundex {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        soundex_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        "soundex"
    }
}

/// Digit class of an uppercase ASCII letter.
///
/// `None` for A, E, I, O, U, Y, H and W.
fn soundex_digit(c: char) -> Option<char> {
    match c {
        'B' | 'F' | 'P' | 'V' => Some('1'),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some('2'),
        'D' | 'T' => Some('3'),
        'L' => Some('4'),
        'M' | 'N' => Some('5'),
        'R' => Some('6'),
        _ => None,
    }
}

/// Encode a word using the Soundex algorithm.
///
/// Returns the first letter (uppercased) plus 3 digits, padded with `0`.
/// Adjacent letters with the same digit collapse into one, including the
/// first letter. A vowel (or `Y`) between them breaks the run; `H` and `W`
/// do not.
///
/// Input without any ASCII letter yields an empty string.
///
/// # Examples
/// ```
/// use phpfuzz::algorithms::phonetic::soundex;
///
/// assert_eq!(soundex("Heilbronn"), "H416");
/// assert_eq!(soundex("Robert"), "R163");
/// assert_eq!(soundex("Rupert"), "R163");
/// assert_eq!(soundex("Ashcraft"), "A261"); // S and C across H collapse
/// assert_eq!(soundex("Tymczak"), "T522"); // K after a vowel is kept
/// assert_eq!(soundex("123"), "");
/// ```
#[must_use]
pub fn soundex(s: &str) -> String {
    let mut letters = s
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());

    let Some(first) = letters.next() else {
        return String::new();
    };

    let mut result = String::with_capacity(SOUNDEX_LEN);
    result.push(first);

    let mut prev_digit = soundex_digit(first);

    for c in letters {
        if result.len() >= SOUNDEX_LEN {
            break;
        }

        // Transparent: keep prev_digit so the run continues across them
        if matches!(c, 'H' | 'W') {
            continue;
        }

        let digit = soundex_digit(c);
        if let Some(d) = digit {
            if digit != prev_digit {
                result.push(d);
            }
        }

        // Vowels reset to None, which breaks the run
        prev_digit = digit;
    }

    while result.len() < SOUNDEX_LEN {
        result.push('0');
    }

    result
}

/// Check if two strings have the same non-empty Soundex code.
#[must_use]
pub fn soundex_match(a: &str, b: &str) -> bool {
    let code_a = soundex(a);
    !code_a.is_empty() && code_a == soundex(b)
}

/// Soundex similarity: 1.0 if codes match, otherwise the fraction of
/// positions that agree. 0.0 when either side has no letters.
#[must_use]
pub fn soundex_similarity(a: &str, b: &str) -> f64 {
    let code_a = soundex(a);
    let code_b = soundex(b);

    if code_a.is_empty() || code_b.is_empty() {
        return 0.0;
    }

    if code_a == code_b {
        return 1.0;
    }

    let matches = code_a
        .chars()
        .zip(code_b.chars())
        .filter(|(a, b)| a == b)
        .count();

    matches as f64 / SOUNDEX_LEN as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_soundex_reference_vectors() {
        assert_eq!(soundex("Heilbronn"), "H416");
        assert_eq!(soundex("Robert"), "R163");
        assert_eq!(soundex("Rupert"), "R163");
        assert_eq!(soundex("Rubin"), "R150");
        assert_eq!(soundex("Tymczak"), "T522");
        assert_eq!(soundex("Pfister"), "P236");
        assert_eq!(soundex("Honeyman"), "H555");
        assert_eq!(soundex("Smith"), "S530");
        assert_eq!(soundex("Smyth"), "S530");
    }

    #[test]
    fn test_soundex_h_w_transparent() {
        // S (2), H, C (2): collapsed across H
        assert_eq!(soundex("Ashcraft"), "A261");
        assert_eq!(soundex("Ashcroft"), "A261");
        // C (2), W, Z (2): collapsed across W
        assert_eq!(soundex("Acwzr"), "A260");
    }

    #[test]
    fn test_soundex_vowel_breaks_run() {
        // K (2), A, K (2): kept after a vowel
        assert_eq!(soundex("Kakak"), "K220");
        assert_eq!(soundex("Tymczak"), "T522");
    }

    #[test]
    fn test_soundex_padding() {
        assert_eq!(soundex("A"), "A000");
        assert_eq!(soundex("Lee"), "L000");
        assert_eq!(soundex("Lloyd"), "L300");
    }

    #[test]
    fn test_soundex_ignores_non_letters() {
        assert_eq!(soundex(""), "");
        assert_eq!(soundex("  "), "");
        assert_eq!(soundex("1234 !?"), "");
        assert_eq!(soundex("  o'Brien "), "O165");
        assert_eq!(soundex("ßmith"), "M300");
        assert_eq!(soundex("简体Robert"), "R163");
    }

    #[test]
    fn test_soundex_case_insensitive() {
        assert_eq!(soundex("heilbronn"), "H416");
        assert_eq!(soundex("HEILBRONN"), soundex("hEiLbRoNn"));
    }

    #[test]
    fn test_soundex_match_and_similarity() {
        assert!(soundex_match("Robert", "Rupert"));
        assert!(!soundex_match("Robert", "Rubin"));
        assert!(!soundex_match("", ""));

        assert_eq!(soundex_similarity("Robert", "Rupert"), 1.0);
        // R163 vs R150: R matches, 1 matches
        assert_eq!(soundex_similarity("Robert", "Rubin"), 0.5);
        assert_eq!(soundex_similarity("", "Robert"), 0.0);

        let sx = Soundex::new();
        assert_eq!(sx.encode("Heilbronn"), "H416");
        assert_eq!(sx.similarity("Smith", "Smyth"), 1.0);
        assert_eq!(sx.name(), "soundex");
    }

    proptest! {
        #[test]
        fn prop_shape(s in "\\PC{0,24}") {
            let code = soundex(&s);
            if s.chars().any(|c| c.is_ascii_alphabetic()) {
                prop_assert_eq!(code.len(), SOUNDEX_LEN);
                prop_assert!(code.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
                prop_assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
            } else {
                prop_assert!(code.is_empty());
            }
        }

        #[test]
        fn prop_case_invariant(s in "[a-zA-Z]{1,16}") {
            prop_assert_eq!(soundex(&s), soundex(&s.to_lowercase()));
            prop_assert_eq!(soundex(&s), soundex(&s));
        }
    }
}
