//! SyntaxKind enum for the nodes of the arena syntax tree.
//!
//! tree-sitter reports node kinds as strings. The sink maps each of them onto
//! this closed enum once, so the classifier can match exhaustively instead of
//! comparing strings on every ancestor step.

/// All syntax kinds the classifier distinguishes.
///
/// Anything the classifier does not care about collapses into [`SyntaxKind::NODE`]
/// (named grammar nodes) or [`SyntaxKind::TOKEN`] (anonymous punctuation).
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (anonymous leaves) ===
    /// `<`
    L_ANGLE,
    /// `>`
    R_ANGLE,
    /// `/`
    SLASH,
    /// `{`
    L_CURLY,
    /// `}`
    R_CURLY,
    /// Any other anonymous token
    TOKEN,

    // === Composite Nodes ===
    /// Root of the parsed program
    ROOT,
    /// `<tag>...</tag>`
    JSX_ELEMENT,
    /// `<>...</>`
    JSX_FRAGMENT,
    /// `<tag attr>` or `<>`
    JSX_OPENING_ELEMENT,
    /// `</tag>` or `</>`
    JSX_CLOSING_ELEMENT,
    /// `<tag attr />`
    JSX_SELF_CLOSING_ELEMENT,
    /// The element name inside a tag delimiter
    JSX_TAG_NAME,
    /// Synthesized wrapper spanning every attribute of one tag
    JSX_ATTRIBUTE_LIST,
    /// `name="value"` or `name={expr}`
    JSX_ATTRIBUTE,
    /// `{ expr }` inside element content or a tag
    JSX_EXPRESSION,
    /// Literal character data between tags
    JSX_TEXT,
    /// `&amp;` and friends inside element content
    JSX_CHARACTER_REFERENCE,
    /// Line or block comment
    COMMENT,
    /// Any other named grammar node
    NODE,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Map a tree-sitter node kind onto our closed set.
    ///
    /// `named` distinguishes grammar nodes from anonymous tokens with the same
    /// spelling. Fragment detection and tag names need more context than the
    /// kind string alone and are handled by the sink.
    pub fn from_tree_sitter(kind: &str, named: bool) -> Self {
        if !named {
            return match kind {
                "<" => Self::L_ANGLE,
                ">" => Self::R_ANGLE,
                "/" => Self::SLASH,
                "{" => Self::L_CURLY,
                "}" => Self::R_CURLY,
                _ => Self::TOKEN,
            };
        }
        match kind {
            "program" => Self::ROOT,
            "jsx_element" => Self::JSX_ELEMENT,
            "jsx_fragment" => Self::JSX_FRAGMENT,
            "jsx_opening_element" => Self::JSX_OPENING_ELEMENT,
            "jsx_closing_element" => Self::JSX_CLOSING_ELEMENT,
            "jsx_self_closing_element" => Self::JSX_SELF_CLOSING_ELEMENT,
            "jsx_attribute" => Self::JSX_ATTRIBUTE,
            "jsx_expression" => Self::JSX_EXPRESSION,
            "jsx_text" => Self::JSX_TEXT,
            "html_character_reference" => Self::JSX_CHARACTER_REFERENCE,
            "comment" => Self::COMMENT,
            "ERROR" => Self::ERROR,
            _ => Self::NODE,
        }
    }

    /// Returns true if this kind represents an anonymous token.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::TOKEN as u16)
    }

    /// Element or fragment: a scope with its own text content.
    pub fn is_element_like(self) -> bool {
        matches!(self, Self::JSX_ELEMENT | Self::JSX_FRAGMENT)
    }

    /// Tags that may carry a name and attributes.
    pub fn is_opening_tag(self) -> bool {
        matches!(
            self,
            Self::JSX_OPENING_ELEMENT | Self::JSX_SELF_CLOSING_ELEMENT
        )
    }

    /// Any tag delimiter span: opening, closing or self-closing.
    pub fn is_tag(self) -> bool {
        self.is_opening_tag() || self == Self::JSX_CLOSING_ELEMENT
    }

    /// Literal character data.
    pub fn is_text(self) -> bool {
        matches!(self, Self::JSX_TEXT | Self::JSX_CHARACTER_REFERENCE)
    }

    /// Whether the presence of this kind means the buffer contains markup.
    pub fn is_markup(self) -> bool {
        self.is_element_like() || self == Self::JSX_SELF_CLOSING_ELEMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::L_ANGLE.is_token());
        assert!(SyntaxKind::TOKEN.is_token());
        assert!(!SyntaxKind::ROOT.is_token());
        assert!(!SyntaxKind::JSX_TEXT.is_token());
    }

    #[rstest]
    #[case("jsx_element", SyntaxKind::JSX_ELEMENT)]
    #[case("jsx_self_closing_element", SyntaxKind::JSX_SELF_CLOSING_ELEMENT)]
    #[case("jsx_expression", SyntaxKind::JSX_EXPRESSION)]
    #[case("html_character_reference", SyntaxKind::JSX_CHARACTER_REFERENCE)]
    #[case("binary_expression", SyntaxKind::NODE)]
    #[case("ERROR", SyntaxKind::ERROR)]
    fn named_kinds_map(#[case] raw: &str, #[case] expected: SyntaxKind) {
        assert_eq!(SyntaxKind::from_tree_sitter(raw, true), expected);
    }

    #[test]
    fn anonymous_punctuation_is_not_confused_with_nodes() {
        assert_eq!(SyntaxKind::from_tree_sitter("<", false), SyntaxKind::L_ANGLE);
        assert_eq!(SyntaxKind::from_tree_sitter("=>", false), SyntaxKind::TOKEN);
        // `comment` could in principle be spelled by a keyword token
        assert_eq!(SyntaxKind::from_tree_sitter("comment", false), SyntaxKind::TOKEN);
    }

    #[test]
    fn tag_predicates() {
        assert!(SyntaxKind::JSX_CLOSING_ELEMENT.is_tag());
        assert!(!SyntaxKind::JSX_CLOSING_ELEMENT.is_opening_tag());
        assert!(SyntaxKind::JSX_SELF_CLOSING_ELEMENT.is_opening_tag());
        assert!(SyntaxKind::JSX_FRAGMENT.is_element_like());
        assert!(SyntaxKind::JSX_SELF_CLOSING_ELEMENT.is_markup());
        assert!(!SyntaxKind::JSX_EXPRESSION.is_markup());
    }
}
