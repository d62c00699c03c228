//! Line classification for `key=value` files.
//!
//! Each input line is one of:
//! - a comment (`#` appears before any `=`)
//! - a line without assignment (blank lines included)
//! - a malformed assignment (empty key or value after trimming and unquoting)
//! - an entry

/// One line of input during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
}

/// Outcome of classifying a [`RawLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    NoAssignment,
    Malformed,
    Entry { key: &'a str, value: &'a str },
}

impl<'a> RawLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }

    /// Classify the line.
    ///
    /// A `#` that comes after the first `=` is part of the value.
    pub fn classify(&self) -> LineKind<'a> {
        let hash = self.text.find('#');
        let equal = self.text.find('=');

        if let Some(hash) = hash {
            if equal.map_or(true, |eq| eq > hash) {
                return LineKind::Comment;
            }
        }

        let Some(equal) = equal else {
            return LineKind::NoAssignment;
        };

        let key = unquote(trim(&self.text[..equal]));
        let value = unquote(trim(&self.text[equal + 1..]));

        if key.is_empty() || value.is_empty() {
            LineKind::Malformed
        } else {
            LineKind::Entry { key, value }
        }
    }
}

/// Whitespace as the C locale defines it (includes vertical tab and form feed).
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Strip whitespace from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Strip matching single or double quotes from both ends, repeatedly.
///
/// `"abc"` becomes `abc`, `""abc""` becomes `abc`. A lone quote character is kept.
pub fn unquote(mut s: &str) -> &str {
    loop {
        let bytes = s.as_bytes();
        if bytes.len() <= 1 {
            return s;
        }
        let first = bytes[0];
        if !matches!(first, b'"' | b'\'') || first != bytes[bytes.len() - 1] {
            return s;
        }
        // Both ends are ASCII, so these are char boundaries
        s = &s[1..s.len() - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(text: &str) -> LineKind<'_> {
        RawLine::new(1, text).classify()
    }

    #[test]
    fn test_simple_entry() {
        assert_eq!(
            classify("name = Alice"),
            LineKind::Entry {
                key: "name",
                value: "Alice"
            }
        );
        assert_eq!(
            classify("age=30"),
            LineKind::Entry {
                key: "age",
                value: "30"
            }
        );
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(classify("# key = value"), LineKind::Comment);
        assert_eq!(classify("   # just a note"), LineKind::Comment);
        // '#' before '=' discards the whole line, including the part before '#'
        assert_eq!(classify("key # = value"), LineKind::Comment);
    }

    #[test]
    fn test_hash_after_equal_is_part_of_value() {
        assert_eq!(
            classify("key = value # comment"),
            LineKind::Entry {
                key: "key",
                value: "value # comment"
            }
        );
        assert_eq!(
            classify("color=#ff0000"),
            LineKind::Entry {
                key: "color",
                value: "#ff0000"
            }
        );
    }

    #[test]
    fn test_lines_without_equal() {
        assert_eq!(classify(""), LineKind::NoAssignment);
        assert_eq!(classify("   \t"), LineKind::NoAssignment);
        assert_eq!(classify("just words"), LineKind::NoAssignment);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(classify("empty_value="), LineKind::Malformed);
        assert_eq!(classify("= value"), LineKind::Malformed);
        assert_eq!(classify("  =  "), LineKind::Malformed);
        assert_eq!(classify("key = \"\""), LineKind::Malformed);
    }

    #[test]
    fn test_splits_on_first_equal() {
        assert_eq!(
            classify("url = http://host/?a=1&b=2"),
            LineKind::Entry {
                key: "url",
                value: "http://host/?a=1&b=2"
            }
        );
    }

    #[test]
    fn test_quoted_key_and_value() {
        assert_eq!(
            classify("'greeting' = \"  hello world  \""),
            LineKind::Entry {
                key: "greeting",
                value: "  hello world  "
            }
        );
    }

    #[test]
    fn test_crlf_line() {
        assert_eq!(
            classify("name = Bob\r"),
            LineKind::Entry {
                key: "name",
                value: "Bob"
            }
        );
    }

    #[test]
    fn test_trim_c_whitespace() {
        assert_eq!(trim("\x0b\x0c value \t\r\n"), "value");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("\"\"abc\"\""), "abc");
        assert_eq!(unquote("'\"abc\"'"), "abc");
        assert_eq!(unquote("\"abc'"), "\"abc'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\"'\""), "'");
        assert_eq!(unquote("abc"), "abc");
    }

    proptest! {
        #[test]
        fn prop_well_formed_line_yields_entry(
            key in "[a-zA-Z_][a-zA-Z0-9_.]{0,15}",
            value in "[a-zA-Z0-9_./:-]([a-zA-Z0-9 _./:#=-]{0,20}[a-zA-Z0-9_./:-])?",
            lead in "[ \t]{0,3}",
            before_eq in "[ \t]{0,3}",
            after_eq in "[ \t]{0,3}",
            tail in "[ \t]{0,3}",
        ) {
            let line = format!("{lead}{key}{before_eq}={after_eq}{value}{tail}");
            prop_assert_eq!(
                RawLine::new(1, &line).classify(),
                LineKind::Entry { key: key.as_str(), value: value.as_str() }
            );
        }

        #[test]
        fn prop_unquote_is_idempotent(s in "[\"'a-c ]{0,10}") {
            let once = unquote(&s);
            prop_assert_eq!(unquote(once), once);
        }

        #[test]
        fn prop_hash_before_equal_is_comment(
            prefix in "[a-z ]{0,5}",
            rest in "[a-z =#]{0,10}",
        ) {
            let line = format!("{prefix}#{rest}");
            prop_assert_eq!(RawLine::new(1, &line).classify(), LineKind::Comment);
        }
    }
}
