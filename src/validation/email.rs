//! Email address pattern

use regex::Regex;
use std::sync::LazyLock;

/// Something, an `@`, something, a dot, something. No whitespace, no
/// byte-order mark and no second `@` anywhere.
pub const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Check a value against [`EMAIL_PATTERN`]. The value is matched as given;
/// callers trim first.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Strip surrounding whitespace, counting U+FEFF as whitespace the way
/// browser form values do
pub(crate) fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_simple_addresses() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_rejects_missing_parts() {
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_rejects_whitespace_and_double_at() {
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("john@exa mple.com"));
        assert!(!is_valid_email("john@@example.com"));
        assert!(!is_valid_email("john@foo@example.com"));
    }

    #[test]
    fn test_untrimmed_value_is_rejected() {
        // Leading/trailing whitespace is the caller's job to strip
        assert!(!is_valid_email(" john@example.com"));
        assert!(!is_valid_email("john@example.com\n"));
    }

    #[test]
    fn test_dot_may_appear_anywhere_after_at() {
        // Only the final segment split matters: "b.c.d" has a dot with text on both sides
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.b"));
    }

    #[test]
    fn test_rejects_byte_order_mark_inside() {
        assert!(!is_valid_email("a\u{FEFF}@b.c"));
        assert!(!is_valid_email("a@b\u{FEFF}.c"));
        assert!(!is_valid_email("a@b.c\u{FEFF}x"));
    }

    #[test]
    fn test_trim_value_strips_byte_order_mark() {
        assert_eq!(trim_value("\u{FEFF} a@b.c \u{FEFF}"), "a@b.c");
        assert_eq!(trim_value("\u{FEFF}\t\n"), "");
        assert_eq!(trim_value("in\u{FEFF}side"), "in\u{FEFF}side");
    }
}
