use super::Dialect;

/// One classification request: a position in a buffer of a known dialect.
///
/// `offset` is a byte offset into `text`. Offsets past the end are allowed
/// here and classify as not-text-content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe<'a> {
    pub dialect: Dialect,
    pub source_id: &'a str,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Probe<'a> {
    pub fn new(dialect: Dialect, source_id: &'a str, text: &'a str, offset: usize) -> Self {
        Self {
            dialect,
            source_id,
            text,
            offset,
        }
    }

    /// Build a probe from an editor language identifier; `None` if the
    /// identifier is not one we classify.
    pub fn for_language(
        language_id: &str,
        source_id: &'a str,
        text: &'a str,
        offset: usize,
    ) -> Option<Self> {
        Dialect::from_language_id(language_id)
            .map(|dialect| Self::new(dialect, source_id, text, offset))
    }

    pub fn offset_in_range(&self) -> bool {
        self.offset <= self.text.len()
    }
}

/// Convert a zero-based line/character position into a byte offset.
///
/// Characters are counted as Unicode scalar values. A column past the end of
/// its line clamps to the line end; a line past the end of the text is `None`.
pub fn offset_at(text: &str, line: usize, column: usize) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..line {
        line_start += text[line_start..].find('\n')? + 1;
    }

    let rest = &text[line_start..];
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let line_text = &rest[..line_len];
    let within = line_text
        .char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line_len);
    Some(line_start + within)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn probe_for_unsupported_language_is_none() {
        assert!(Probe::for_language("python", "a.py", "x < y", 1).is_none());
    }

    #[test]
    fn probe_for_supported_language() {
        let probe = Probe::for_language("html", "a.html", "<p>x</p>", 3).unwrap();
        assert_eq!(probe.dialect, Dialect::MarkupOnly);
        assert!(probe.offset_in_range());
    }

    #[test]
    fn offset_past_end_is_out_of_range() {
        let probe = Probe::new(Dialect::CodeWithMarkup, "a.jsx", "abc", 4);
        assert!(!probe.offset_in_range());
    }

    #[test]
    fn offset_at_first_line() {
        assert_eq!(offset_at("hello\nworld", 0, 2), Some(2));
    }

    #[test]
    fn offset_at_later_line() {
        assert_eq!(offset_at("hello\nworld", 1, 3), Some(9));
    }

    #[test]
    fn offset_at_counts_chars_not_bytes() {
        // "é" is two bytes
        assert_eq!(offset_at("<p>é!</p>", 0, 4), Some(5));
    }

    #[test]
    fn offset_at_clamps_column() {
        assert_eq!(offset_at("ab\ncd", 0, 10), Some(2));
    }

    #[test]
    fn offset_at_missing_line() {
        assert_eq!(offset_at("ab\ncd", 2, 0), None);
    }

    #[test]
    fn offset_at_empty_text() {
        assert_eq!(offset_at("", 0, 0), Some(0));
    }
}
