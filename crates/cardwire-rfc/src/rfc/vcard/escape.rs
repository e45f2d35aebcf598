//! Text escaping and delimited-value splitting for the plain-text format.

/// Escapes a value for use inside a `separator`-delimited property value.
///
/// Backslash, the separator and newlines are backslash-escaped. CRLF and a
/// lone CR are both written as `\n`.
#[must_use]
pub fn escape(value: &str, separator: char) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            _ if c == separator => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a single text value.
///
/// Escapes backslash, newline, comma, and semicolon.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {} // CRLF collapses to the escaped LF
            _ => result.push(c),
        }
    }

    result
}

/// Escapes each value and joins them with `separator`.
///
/// An empty slice yields an empty string.
#[must_use]
pub fn join(values: &[String], separator: char) -> String {
    let mut result = String::new();

    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            result.push(separator);
        }
        result.push_str(&escape(value, separator));
    }

    result
}

/// Reverses backslash escaping.
///
/// `\n`/`\N` become a newline; any other escaped character is taken
/// literally. A trailing lone backslash is kept.
#[must_use]
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(next) => result.push(next),
                None => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits a delimited value on unescaped occurrences of `separator`.
///
/// An escaped separator (`\,`) never splits. Each field is optionally
/// unescaped and then trimmed. An empty input produces one empty field.
#[must_use]
pub fn split(value: &str, separator: char, unescape_each: bool, trim_each: bool) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            current.push(c);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if c == separator {
            fields.push(finish_field(&current, unescape_each, trim_each));
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(finish_field(&current, unescape_each, trim_each));

    fields
}

fn finish_field(raw: &str, unescape_each: bool, trim_each: bool) -> String {
    let field = if unescape_each {
        unescape(raw)
    } else {
        raw.to_string()
    };

    if trim_each {
        field.trim().to_string()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_basic() {
        assert_eq!(escape("hello", ','), "hello");
    }

    #[test]
    fn escape_separator_backslash_newline() {
        assert_eq!(escape("a,b\\c\nd", ','), "a\\,b\\\\c\\nd");
        assert_eq!(escape("line1\r\nline2", ';'), "line1\\nline2");
    }

    #[test]
    fn escape_only_touches_given_separator() {
        assert_eq!(escape("a;b,c", ';'), r"a\;b,c");
    }

    #[test]
    fn escape_text_special() {
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape(r"Line1\nLine2"), "Line1\nLine2");
        assert_eq!(unescape(r"Line1\NLine2"), "Line1\nLine2");
        assert_eq!(unescape(r"a\,b\;c\\d"), "a,b;c\\d");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn split_plain() {
        assert_eq!(split("a,b,c", ',', false, false), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_respects_escaped_separator() {
        assert_eq!(split(r"a\,b,c", ',', false, false), vec![r"a\,b", "c"]);
        assert_eq!(split(r"a\,b,c", ',', true, false), vec!["a,b", "c"]);
    }

    #[test]
    fn split_after_escaped_backslash() {
        // `\\` is a literal backslash, so the following comma still splits.
        assert_eq!(split(r"a\\,b", ',', true, false), vec!["a\\", "b"]);
    }

    #[test]
    fn split_trims_after_unescape() {
        assert_eq!(split(" a , b ", ',', true, true), vec!["a", "b"]);
        assert_eq!(split(" a , b ", ',', true, false), vec![" a ", " b "]);
    }

    #[test]
    fn split_empty_is_single_empty_field() {
        assert_eq!(split("", ',', true, true), vec![String::new()]);
    }

    #[test]
    fn split_keeps_empty_fields() {
        assert_eq!(split("a,,b,", ',', true, true), vec!["a", "", "b", ""]);
    }

    #[test]
    fn join_round_trips_through_split() {
        let values = vec![
            "Anna".to_string(),
            "Smith, Jr.".to_string(),
            "back\\slash".to_string(),
            "two\nlines".to_string(),
        ];
        let joined = join(&values, ',');
        assert_eq!(joined, "Anna,Smith\\, Jr.,back\\\\slash,two\\nlines");
        assert_eq!(split(&joined, ',', true, true), values);
    }

    #[test]
    fn join_empty() {
        assert_eq!(join(&[], ','), "");
    }
}
