//! Additive Roman numeral summation.
//!
//! Letters are summed independently (`IV` is 6, not 4) across every numeral
//! supplied. Unknown characters count as zero.

use tracing::warn;

/// Value of a single numeral letter.
fn letter_value(letter: char) -> Option<u64> {
    match letter {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Additive value of one numeral string.
pub fn roman_value(numeral: &str) -> u64 {
    numeral
        .chars()
        .map(|letter| {
            letter_value(letter).unwrap_or_else(|| {
                warn!(%letter, numeral, "ignoring unknown roman numeral letter");
                0
            })
        })
        .sum()
}

/// Sum of all supplied numerals.
///
/// # Examples
///
/// ```
/// assert_eq!(fifth_kata::roman_sum(["MXVII", "VI", "X"]), 1033);
/// ```
pub fn roman_sum<I>(numerals: I) -> u64
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    numerals
        .into_iter()
        .map(|numeral| roman_value(numeral.as_ref()))
        .sum()
}
