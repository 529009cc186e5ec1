//! Patent line-number stripping
//!
//! Patent office copies print a line number in the margin at every fifth line. OCR folds that
//! number into the start of the line: `10 said housing comprising`. There is no anchor text to
//! tell a margin number from content, so the only test is arithmetic: a leading digit run that
//! is a positive multiple of 5 and is followed by whitespace is numbering.
//!
//! False positives are accepted. A line that genuinely starts with `10 widgets` loses its `10 `.
//!
//! When several qualifying runs follow each other (`5 10 text`, from two margins merged into one
//! line) all of them are removed, so stripping is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([0-9]+)\s+").unwrap());

/// Strip line numbering from every line of `text`
pub fn strip_line_numbers(text: &str) -> String {
    text.split('\n')
        .map(strip_line_number)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip line numbering from one line (no `\n` inside)
///
/// The leading whitespace in front of a removed number goes with it.
pub fn strip_line_number(line: &str) -> Cow<'_, str> {
    let mut rest = line;
    while let Some(caps) = LEADING_NUMBER.captures(rest) {
        if !is_line_number(&caps[1]) {
            break;
        }
        rest = &rest[caps[0].len()..];
    }
    if rest.len() == line.len() {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(rest.to_string())
    }
}

/// A digit run is a line number when it is positive and divisible by 5.
///
/// Decided on the digits themselves so arbitrarily long runs cannot overflow.
fn is_line_number(digits: &str) -> bool {
    let positive = digits.bytes().any(|b| b != b'0');
    let multiple_of_five = matches!(digits.as_bytes().last(), Some(b'0') | Some(b'5'));
    positive && multiple_of_five
}
