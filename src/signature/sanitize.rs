//! Text field sanitizers
//!
//! These run on the whole field content after every change (keystroke, paste,
//! autofill), so nothing the user enters can bypass them. They are total:
//! invalid input degrades to the nearest valid value, never to an error.

/// Maximum number of digits kept in a phone number.
const PHONE_DIGITS: usize = 10;

/// Returns `true` for characters allowed in names and job titles.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | '.' | ',' | '\'' | '-')
}

/// Strip everything except ASCII letters, spaces, `.`, `,`, `'` and `-`.
///
/// Used for both the full name and the job title.
///
/// ```ignore
/// assert_eq!(sanitize_name_like("J0hn D0e!!"), "Jhn De");
/// ```
pub fn sanitize_name_like(raw: &str) -> String {
    raw.chars().filter(|c| is_name_char(*c)).collect()
}

/// Extract the ASCII digits of `raw`, keeping at most the first ten.
pub fn phone_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Re-punctuate a phone number as `(DDD) DDD-DDDD`.
///
/// Partial input produces the matching prefix: `(5`, `(555) 1`, `(555) 123-4`.
/// Digits are re-extracted first, so formatting an already formatted value
/// gives the same value back.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);

    // digits are ASCII, so byte slicing is on char boundaries
    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
