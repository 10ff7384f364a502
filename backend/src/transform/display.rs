//! Display-name rules.
//!
//! Two regex substitutions turn a file stem into presentation text:
//!
//! 1. A trailing run of digits is a price: `Study12` → `Study&pound;12`.
//! 2. `x` directly before a digit is a dimension sign: `10x5cm` → `10&times;5cm`.
//!
//! Rule 2 runs on the output of rule 1, so the order is fixed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Digit run anchored at end of text. ASCII digits only.
static TRAILING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)$").expect("valid trailing-digits pattern"));

/// Lowercase `x` followed by one ASCII digit.
static TIMES_BEFORE_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"x([0-9])").expect("valid multiplication pattern"));

/// Insert `&pound;` before the digits ending `name`, if any.
pub fn mark_price(name: &str) -> String {
    TRAILING_DIGITS.replace(name, "&pound;${1}").into_owned()
}

/// Replace every `x<digit>` with `&times;<digit>`.
pub fn mark_dimensions(text: &str) -> String {
    TIMES_BEFORE_DIGIT.replace_all(text, "&times;${1}").into_owned()
}

/// Full display transformation: [`mark_price`] then [`mark_dimensions`].
pub fn display_name(name: &str) -> String {
    mark_dimensions(&mark_price(name))
}
