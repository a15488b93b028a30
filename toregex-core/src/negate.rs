//! negate.rs - Builds patterns that match everything another pattern does not.
//!
//! The expansion consumes the input one character at a time, refusing to step
//! over any position where the original pattern would match. Strict negation
//! only rejects inputs that are exactly the original; loose negation rejects
//! any input that contains it. Both forms need look-ahead, so the result is
//! always compiled by the backtracking engine.
//!
//! License: MIT OR APACHE 2.0

use crate::options::{Options, CONTAINS, END_CHAR, STRICT_NEGATE};

const DEFAULT_END_CHAR: &str = "*";

/// Returns the negated form of `pattern`, without outer anchors.
pub fn create(pattern: &str, options: &Options) -> String {
    let loose = options.is_true(CONTAINS) || options.is_false(STRICT_NEGATE);
    let end_char = options
        .get(END_CHAR)
        .filter(|value| value.is_truthy())
        .map(ToString::to_string)
        .unwrap_or_else(|| DEFAULT_END_CHAR.to_string());

    if loose {
        format!("(?:(?!(?:{pattern})).){end_char}")
    } else {
        format!("(?:(?!^(?:{pattern})$).){end_char}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fancy_regex::Regex;

    fn anchored(text: &str) -> Regex {
        Regex::new(&format!("^(?:{text})$")).unwrap()
    }

    #[test]
    fn test_strict_negation_text() {
        assert_eq!(create("foo", &Options::new()), "(?:(?!^(?:foo)$).)*");
    }

    #[test]
    fn test_loose_negation_text() {
        let options = Options::new().strict_negate(false);
        assert_eq!(create("foo", &options), "(?:(?!(?:foo)).)*");
        assert_eq!(create("foo", &Options::new().contains(true)), "(?:(?!(?:foo)).)*");
    }

    #[test]
    fn test_strict_negation_rejects_exact_match_only() {
        let re = anchored(&create("foo", &Options::new()));
        assert!(!re.is_match("foo").unwrap());
        assert!(re.is_match("foobar").unwrap());
        assert!(re.is_match("barfoo").unwrap());
        assert!(re.is_match("").unwrap());
    }

    #[test]
    fn test_loose_negation_rejects_substrings() {
        let re = anchored(&create("foo", &Options::new().strict_negate(false)));
        assert!(!re.is_match("foo").unwrap());
        assert!(!re.is_match("xfoo").unwrap());
        assert!(!re.is_match("foox").unwrap());
        assert!(re.is_match("bar").unwrap());
    }

    #[test]
    fn test_custom_end_char() {
        let options = Options::new().end_char("+");
        let re = anchored(&create("foo", &options));
        assert!(!re.is_match("").unwrap());
        assert!(re.is_match("bar").unwrap());
    }
}
