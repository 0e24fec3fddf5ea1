//! Text-content detection for pure markup (HTML, XML, SVG).
//!
//! Only the nearest delimiters on either side of the offset matter, so there
//! is no nesting to track: the offset is text content iff the closest `<` or
//! `>` behind it is a `>` and it is not sitting inside a comment.

/// Whether `offset` lies in element text content of a markup document.
pub fn classify_markup(text: &str, offset: usize) -> bool {
    if offset == 0 || offset > text.len() {
        return false;
    }
    let bytes = text.as_bytes();
    let before = &bytes[..offset];

    let Some(last_close) = rfind(before, b">") else {
        return false;
    };
    if rfind(before, b"<").is_some_and(|last_open| last_open > last_close) {
        return false;
    }
    if inside_comment(before) {
        return false;
    }

    let next_open = find(&bytes[offset..], b"<")
        .map(|i| offset + i)
        .unwrap_or(bytes.len());
    offset > last_close && offset <= next_open
}

/// `<!--` seen and not yet closed by a `-->`.
fn inside_comment(before: &[u8]) -> bool {
    match rfind(before, b"<!--") {
        Some(open) => rfind(before, b"-->").is_none_or(|close| close < open),
        None => false,
    }
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Split a fixture on `|`, returning the text and the cursor offset.
    fn at_cursor(marked: &str) -> (String, usize) {
        let offset = marked.find('|').expect("fixture needs a cursor");
        (marked.replacen('|', "", 1), offset)
    }

    #[rstest]
    #[case("<div>|</div>", true)]
    #[case("<div>hel|lo</div>", true)]
    #[case("<div>hello|</div>", true)]
    #[case("<div |class=\"a\">x</div>", false)]
    #[case("<di|v>x</div>", false)]
    #[case("<div></di|v>", false)]
    #[case("<br>after void|<p>", true)]
    #[case("<img src=\"a.png\"/>tail|", true)]
    #[case("<p>x</p>|", true)]
    #[case("|<p>x</p>", false)]
    #[case("plain text| only", false)]
    #[case("<div>a > b|</div>", true)]
    fn markup_cursor_positions(#[case] marked: &str, #[case] expected: bool) {
        let (text, offset) = at_cursor(marked);
        assert_eq!(classify_markup(&text, offset), expected, "{marked}");
    }

    #[rstest]
    #[case("<div><!-- no|te --></div>", false)]
    #[case("<div><!-- a > b| --></div>", false)]
    #[case("<div><!-- note -->|after</div>", true)]
    #[case("<div><!-- one --> two <!-- th|ree --></div>", false)]
    fn comments(#[case] marked: &str, #[case] expected: bool) {
        let (text, offset) = at_cursor(marked);
        assert_eq!(classify_markup(&text, offset), expected, "{marked}");
    }

    #[test]
    fn empty_text_is_not_content() {
        assert!(!classify_markup("", 0));
    }

    #[test]
    fn out_of_range_is_not_content() {
        assert!(!classify_markup("<p>x</p>", 99));
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let text = "<p>héllo</p>";
        for offset in 0..=text.len() {
            let _ = classify_markup(text, offset);
        }
        assert!(classify_markup(text, 6));
    }
}
