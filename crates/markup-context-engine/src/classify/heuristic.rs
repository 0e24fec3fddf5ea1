//! # Heuristic Code Scanner
//!
//! A single forward pass over `text[..offset]` that tracks just enough lexical
//! state to know whether the offset sits in element text content, without
//! parsing the host language.
//!
//! ## The `<` problem
//!
//! In JSX-capable code `<` opens a tag, compares two values, or starts a
//! generic argument list. Tags are recognised by local context:
//!
//! ```text
//! return <div>      tag         (keyword before `<`)
//! cond && <div>     tag         (operator before `<`)
//! useState<string>  not a tag   (identifier before `<`)
//! a < b             not a tag   (space after `<`)
//! <T,>(x) => x      not a tag   (generic parameter list)
//! ```
//!
//! ## Scopes
//!
//! Nesting is kept as a stack of [`Scope`]s on top of an implicit code scope.
//! The stack is what lets markup nested inside `{ ... }` be tracked without
//! ever counting as text of the outer element. The scalar views of the state
//! (tag depth, markup-expression depth, inside-tag) are derived from it.
//!
//! Strings, template literals, comments and regex literals are lexical only
//! in code context; in element text `'` and `//` are plain characters.

const JSX_KEYWORDS: &[&[u8]] = &[b"return", b"yield", b"await", b"default", b"case"];

const REGEX_KEYWORDS: &[&[u8]] = &[
    b"return", b"typeof", b"case", b"do", b"else", b"in", b"of", b"yield", b"await", b"void",
    b"delete", b"throw", b"new",
];

/// One level of markup nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Between an element's (or fragment's) opening and closing tags
    Content,
    /// `{ ... }` inside content or a tag
    Expression { braces: usize },
    /// Between the `<` and `>` of a tag
    Tag { closing: bool },
}

/// Everything the scanner knows at the end of its pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    string_delimiter: Option<u8>,
    /// 0: not in a template, 1: template text, >1: inside `${ ... }`
    template_depth: usize,
    code_braces: usize,
    scopes: Vec<Scope>,
}

impl ScanState {
    pub fn in_string(&self) -> bool {
        self.string_delimiter.is_some()
    }

    pub fn in_template(&self) -> bool {
        self.template_depth > 0
    }

    pub fn template_depth(&self) -> usize {
        self.template_depth
    }

    pub fn code_brace_depth(&self) -> usize {
        self.code_braces
    }

    /// Open elements and fragments.
    pub fn tag_depth(&self) -> usize {
        self.scopes.iter().filter(|s| **s == Scope::Content).count()
    }

    pub fn inside_markup_content(&self) -> bool {
        self.tag_depth() > 0
    }

    /// Embedded expressions enclosing the current position.
    pub fn markup_expression_depth(&self) -> usize {
        self.scopes
            .iter()
            .filter(|s| matches!(s, Scope::Expression { .. }))
            .count()
    }

    pub fn inside_tag(&self) -> bool {
        self.scopes.iter().any(|s| matches!(s, Scope::Tag { .. }))
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn is_text_content(&self) -> bool {
        self.inside_markup_content() && self.markup_expression_depth() == 0 && !self.inside_tag()
    }

    fn top(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    fn pop_content(&mut self) {
        if self.top() == Some(Scope::Content) {
            self.scopes.pop();
        }
    }
}

/// Whether `offset` lies in element text content of JSX/TSX source.
pub fn classify_code(text: &str, offset: usize) -> bool {
    if offset == 0 || offset > text.len() {
        return false;
    }
    scan(text, offset).is_some_and(|state| state.is_text_content())
}

/// Run the scanner up to `offset`.
///
/// Returns `None` when the offset falls strictly inside a multi-character
/// delimiter (`<>` or `</>`), which is never text content.
pub fn scan(text: &str, offset: usize) -> Option<ScanState> {
    let bytes = text.as_bytes();
    let offset = offset.min(bytes.len());
    let mut state = ScanState::default();
    let mut i = 0;

    while i < offset {
        let b = bytes[i];

        if let Some(delimiter) = state.string_delimiter {
            match b {
                b'\\' => i += 1,
                // Attribute strings may span lines; code strings may not
                b'\n' if !matches!(state.top(), Some(Scope::Tag { .. })) => {
                    state.string_delimiter = None
                }
                _ if b == delimiter => state.string_delimiter = None,
                _ => {}
            }
            i += 1;
            continue;
        }

        if state.template_depth > 0 {
            match b {
                b'\\' => i += 1,
                b'`' if state.template_depth == 1 => state.template_depth = 0,
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    state.template_depth += 1;
                    i += 1;
                }
                b'{' if state.template_depth > 1 => state.template_depth += 1,
                b'}' if state.template_depth > 1 => state.template_depth -= 1,
                _ => {}
            }
            i += 1;
            continue;
        }

        i = match state.top() {
            Some(Scope::Content) => step_text(&mut state, bytes, i, offset)?,
            Some(Scope::Tag { closing }) => step_tag(&mut state, bytes, i, closing),
            None | Some(Scope::Expression { .. }) => step_code(&mut state, bytes, i, offset)?,
        };
    }

    Some(state)
}

/// Element content: only tags and `{` mean anything.
fn step_text(state: &mut ScanState, bytes: &[u8], i: usize, offset: usize) -> Option<usize> {
    match bytes[i] {
        b'{' => {
            state.scopes.push(Scope::Expression { braces: 1 });
            Some(i + 1)
        }
        b'<' => open_delimiter(state, bytes, i, offset),
        _ => Some(i + 1),
    }
}

/// Between `<` and `>`: attribute strings, attribute expressions and the end.
fn step_tag(state: &mut ScanState, bytes: &[u8], i: usize, closing: bool) -> usize {
    match bytes[i] {
        quote @ (b'"' | b'\'') => state.string_delimiter = Some(quote),
        b'{' => state.scopes.push(Scope::Expression { braces: 1 }),
        b'>' => {
            state.scopes.pop();
            let self_closing = i > 0 && bytes[i - 1] == b'/';
            if closing {
                state.pop_content();
            } else if !self_closing {
                state.scopes.push(Scope::Content);
            }
        }
        _ => {}
    }
    i + 1
}

/// Host-language code: top level or inside an embedded expression.
fn step_code(state: &mut ScanState, bytes: &[u8], i: usize, offset: usize) -> Option<usize> {
    let next = match bytes[i] {
        quote @ (b'"' | b'\'') => {
            state.string_delimiter = Some(quote);
            i + 1
        }
        b'`' => {
            state.template_depth = 1;
            i + 1
        }
        b'/' => skip_comment_or_regex(bytes, i),
        b'{' => {
            match state.scopes.last_mut() {
                Some(Scope::Expression { braces }) => *braces += 1,
                _ => state.code_braces += 1,
            }
            i + 1
        }
        b'}' => {
            match state.scopes.last_mut() {
                Some(Scope::Expression { braces }) => {
                    *braces -= 1;
                    if *braces == 0 {
                        state.scopes.pop();
                    }
                }
                _ => state.code_braces = state.code_braces.saturating_sub(1),
            }
            i + 1
        }
        b'<' if is_tag_start(bytes, i) => return open_delimiter(state, bytes, i, offset),
        _ => i + 1,
    };
    Some(next)
}

/// Handle a `<` already known to start markup.
fn open_delimiter(state: &mut ScanState, bytes: &[u8], i: usize, offset: usize) -> Option<usize> {
    match bytes.get(i + 1) {
        Some(b'>') => {
            if i + 2 > offset {
                return None;
            }
            state.scopes.push(Scope::Content);
            Some(i + 2)
        }
        Some(b'/') if bytes.get(i + 2) == Some(&b'>') => {
            if i + 3 > offset {
                return None;
            }
            state.pop_content();
            Some(i + 3)
        }
        Some(b'/') => {
            state.scopes.push(Scope::Tag { closing: true });
            Some(i + 2)
        }
        Some(c) if c.is_ascii_alphabetic() => {
            state.scopes.push(Scope::Tag { closing: false });
            Some(i + 1)
        }
        _ => Some(i + 1),
    }
}

/// Decide whether a `<` in code context opens markup.
fn is_tag_start(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1) {
        Some(b'/' | b'>') => {}
        Some(c) if c.is_ascii_alphabetic() => {
            if is_generic_parameter_list(bytes, i + 1) {
                return false;
            }
        }
        _ => return false,
    }

    match previous_significant(bytes, i) {
        None => true,
        Some(j) => match bytes[j] {
            b')' | b']' => false,
            c if is_ident_byte(c) => JSX_KEYWORDS.contains(&word_ending_at(bytes, j)),
            _ => true,
        },
    }
}

/// `<T,>`, `<T extends U>` or `<T>(...)`: a type parameter list, not a tag.
///
/// `<T>(` is only a tag if a matching `</T` follows somewhere later.
fn is_generic_parameter_list(bytes: &[u8], name_start: usize) -> bool {
    let mut j = name_start;
    while j < bytes.len() && is_ident_byte(bytes[j]) {
        j += 1;
    }
    let name = &bytes[name_start..j];
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    let rest = &bytes[j..];
    if rest.starts_with(b">(") {
        let closer = [&b"</"[..], name].concat();
        return !rest.windows(closer.len()).any(|w| w == closer.as_slice());
    }
    rest.starts_with(b",")
        || (rest.starts_with(b"extends") && rest.get(7).is_none_or(|c| !is_ident_byte(*c)))
}

/// Skip a `//` or `/* */` comment or a regex literal starting at `i`.
/// Returns the index to resume from; a plain division advances by one.
fn skip_comment_or_regex(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i + 1) {
        Some(b'/') => bytes[i..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |n| i + n),
        Some(b'*') => bytes[i + 2..]
            .windows(2)
            .position(|w| w == b"*/")
            .map_or(bytes.len(), |n| i + 2 + n + 2),
        _ if regex_allowed(bytes, i) => skip_regex(bytes, i),
        _ => i + 1,
    }
}

fn regex_allowed(bytes: &[u8], i: usize) -> bool {
    match previous_significant(bytes, i) {
        None => true,
        Some(j) => match bytes[j] {
            c if is_ident_byte(c) => REGEX_KEYWORDS.contains(&word_ending_at(bytes, j)),
            c => b"(,=:[!&|?{};+-*%<>~^".contains(&c),
        },
    }
}

fn skip_regex(bytes: &[u8], i: usize) -> usize {
    let mut j = i + 1;
    let mut in_class = false;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 1,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                j += 1;
                while j < bytes.len() && is_ident_byte(bytes[j]) {
                    j += 1;
                }
                return j;
            }
            // Unterminated on this line: it was a division after all
            b'\n' => return i + 1,
            _ => {}
        }
        j += 1;
    }
    i + 1
}

/// Index of the nearest non-whitespace byte before `i`.
fn previous_significant(bytes: &[u8], i: usize) -> Option<usize> {
    bytes[..i].iter().rposition(|b| !b.is_ascii_whitespace())
}

/// The identifier that ends at index `j` (inclusive).
fn word_ending_at(bytes: &[u8], j: usize) -> &[u8] {
    let start = bytes[..=j]
        .iter()
        .rposition(|&b| !is_ident_byte(b))
        .map_or(0, |p| p + 1);
    &bytes[start..=j]
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn at_cursor(marked: &str) -> (String, usize) {
        let offset = marked.find('|').expect("fixture needs a cursor");
        (marked.replacen('|', "", 1), offset)
    }

    fn classify_marked(marked: &str) -> bool {
        let (text, offset) = at_cursor(marked);
        classify_code(&text, offset)
    }

    #[rstest]
    #[case("return <div>he|llo</div>;")]
    #[case("cond && <div>X|</div>")]
    #[case("cond || <div>|X</div>")]
    #[case("a ? <div>X|</div> : null")]
    #[case("const el = <>fr|ag</>;")]
    #[case("const C = () => <p>Don't st|op</p>;")]
    #[case("return (\n  <ul>\n   | <li>a</li>\n  </ul>\n);")]
    #[case("return <p>a<b>bold</b> tai|l</p>;")]
    #[case("return <p>{name} he|llo</p>;")]
    #[case("return <p><br/>af|ter</p>;")]
    #[case("return <a href=\"x>y\">li|nk</a>;")]
    #[case("return <button onClick={() => go(1)}>Cl|ick</button>;")]
    #[case("const s = `${a}`;\nreturn <p>t|</p>;")]
    #[case("// a < b\nreturn <p>t|</p>;")]
    #[case("const r = /<b>/g;\nreturn <p>t|</p>;")]
    #[case("type F = <T>(x: T) => T;\nreturn <p>t|</p>;")]
    #[case("return <a title=\"one\ntwo\">te|xt</a>;")]
    #[case("return <T>(\n  <b>b|old</b>\n</T>);")]
    fn text_content(#[case] marked: &str) {
        assert!(classify_marked(marked), "{marked}");
    }

    #[rstest]
    #[case("const [s, setS] = useState<str|ing>('');")]
    #[case("const xs: Array<num|ber> = [];")]
    #[case("const m = new Map<string, n|umber>();")]
    #[case("function f<T>(x: T) { re|turn x; }")]
    #[case("if (a < b) { f|(); }")]
    #[case("const ok = a > b|;")]
    #[case("const ok = a <= b|;")]
    #[case("const y = x < y ? 1 : 2|;")]
    #[case("const f = <T,>(x: T) => x|;")]
    #[case("const f = <T extends object>(x: T) => x|;")]
    #[case("type F = <T>(x: T|) => T;")]
    #[case("interface P { on: <T>(v: T) => vo|id }")]
    #[case("return <div cl|assName=\"a\">x</div>;")]
    #[case("return <div>x</di|v>;")]
    #[case("return <div>{na|me}</div>;")]
    #[case("return <div>{cond && <span>X|</span>}</div>;")]
    #[case("return <div>{items.map(i => <li>{i}|</li>)}</div>;")]
    #[case("const s = \"<div>te|xt</div>\";")]
    #[case("const s = `<div>te|xt</div>`;")]
    #[case("// <div>te|xt</div>")]
    #[case("/* <div>te|xt</div> */")]
    #[case("const r = /<b>te|xt/;")]
    #[case("return <div>x</div>|;")]
    #[case("return <img src=\"a\" |/>;")]
    #[case("<|>x</>")]
    #[case("<>x</|>")]
    #[case("<>x<|/>")]
    fn not_text_content(#[case] marked: &str) {
        assert!(!classify_marked(marked), "{marked}");
    }

    #[test]
    fn empty_and_out_of_range() {
        assert!(!classify_code("", 0));
        assert!(!classify_code("<p>x</p>", 0));
        assert!(!classify_code("<p>x</p>", 100));
    }

    #[test]
    fn content_offsets_of_simple_element() {
        let text = "<div>abc</div>";
        let verdicts: Vec<bool> = (0..=text.len()).map(|o| classify_code(text, o)).collect();
        let expected: Vec<bool> = (0..=text.len()).map(|o| (5..=8).contains(&o)).collect();
        assert_eq!(verdicts, expected);
    }

    #[test]
    fn stray_closers_do_not_underflow() {
        let state = scan("}}</div></div></> x", 19).unwrap();
        assert_eq!(state.tag_depth(), 0);
        assert_eq!(state.code_brace_depth(), 0);
        assert!(!state.is_text_content());
    }

    #[test]
    fn template_interpolation_depth() {
        let text = "const s = `a ${ {k: 1}.k } b";
        let state = scan(text, text.len()).unwrap();
        assert!(state.in_template());
        assert_eq!(state.template_depth(), 1);
    }

    #[test]
    fn unterminated_string_ends_at_newline() {
        let text = "const s = 'oops\nreturn <p>t</p>;";
        let offset = text.find("<p>").unwrap() + 3;
        assert!(!scan(text, offset).unwrap().in_string());
        assert!(classify_code(text, offset));
    }

    #[test]
    fn attribute_string_spans_lines() {
        let text = "return <a title=\"one\ntwo\">x</a>;";
        let offset = text.find("two").unwrap();
        let state = scan(text, offset).unwrap();
        assert!(state.in_string());
        assert!(state.inside_tag());
    }

    #[test]
    fn nested_scopes_snapshot() {
        let text = "return <div>{a && <b>{c}</b>}</div>;";
        let state = scan(text, text.find('c').unwrap()).unwrap();
        insta::assert_debug_snapshot!(state.scopes(), @r"
        [
            Content,
            Expression {
                braces: 1,
            },
            Content,
            Expression {
                braces: 1,
            },
        ]
        ");
    }

    #[test]
    fn expression_depth_is_reported() {
        let text = "return <div>{a && <b>{c}</b>}</div>;";
        let offset = text.find('c').unwrap();
        let state = scan(text, offset).unwrap();
        assert_eq!(state.markup_expression_depth(), 2);
        assert_eq!(state.tag_depth(), 2);
        assert!(!state.inside_tag());
        assert!(!state.is_text_content());
    }
}
