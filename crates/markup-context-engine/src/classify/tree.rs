//! Text-content detection by walking the syntax tree.
//!
//! The deepest node covering the offset is found first, then its ancestor
//! chain is tested against a fixed sequence of checks. The first check that
//! matches decides:
//!
//! 1. inside a tag's name or attribute list → not text
//! 2. inside an embedded `{ ... }` expression → not text
//! 3. inside a literal text node → text
//! 4. strictly inside a tag delimiter → not text
//! 5. in the gap between an element's opening and closing tags → text
//! 6. anything else → not text
//!
//! The order matters: attribute values and expressions can themselves
//! contain elements with text nodes, and those must never count.

use markup_context_syntax::{NodeId, SyntaxKind, SyntaxTree, parse};

/// Parse `text` and classify `offset`.
pub fn classify_tree(text: &str, offset: usize) -> bool {
    if offset > text.len() {
        return false;
    }
    classify_in_tree(&parse(text), offset)
}

/// Classify `offset` against an already parsed tree.
pub fn classify_in_tree(tree: &SyntaxTree, offset: usize) -> bool {
    if !tree.has_markup() {
        return false;
    }
    let Some(deepest) = tree.covering_node(offset) else {
        return false;
    };

    if in_attribute_area(tree, deepest, offset) {
        return false;
    }
    if in_embedded_expression(tree, deepest, offset) {
        return false;
    }
    if tree.ancestors(deepest).any(|id| tree.kind(id).is_text()) {
        return true;
    }
    if on_tag_delimiter(tree, deepest, offset) {
        return false;
    }
    in_element_gap(tree, deepest, offset)
}

/// Between the `<` of an opening tag and the end of its attribute list.
fn in_attribute_area(tree: &SyntaxTree, deepest: NodeId, offset: usize) -> bool {
    tree.ancestors(deepest)
        .filter(|&id| tree.kind(id).is_opening_tag())
        .any(|tag| {
            let start = tree.node(tag).start;
            let name_end = tree
                .child_of_kind(tag, SyntaxKind::JSX_TAG_NAME)
                .map(|name| tree.node(name).end);
            let attributes = tree
                .child_of_kind(tag, SyntaxKind::JSX_ATTRIBUTE_LIST)
                .map(|list| tree.node(list));

            let in_name = name_end.is_some_and(|end| start < offset && offset <= end);
            let in_attributes =
                attributes.is_some_and(|list| list.start <= offset && offset <= list.end);
            in_name || in_attributes
        })
}

fn in_embedded_expression(tree: &SyntaxTree, deepest: NodeId, offset: usize) -> bool {
    tree.ancestors(deepest).any(|id| {
        tree.kind(id) == SyntaxKind::JSX_EXPRESSION && tree.node(id).strictly_contains(offset)
    })
}

/// The deepest node, or the tag it belongs to, strictly contains the offset.
fn on_tag_delimiter(tree: &SyntaxTree, deepest: NodeId, offset: usize) -> bool {
    tree.ancestors(deepest)
        .take_while(|&id| !tree.kind(id).is_element_like())
        .any(|id| tree.kind(id).is_tag() && tree.node(id).strictly_contains(offset))
}

/// Between an element's own opening and closing tags, outside any child tag.
fn in_element_gap(tree: &SyntaxTree, deepest: NodeId, offset: usize) -> bool {
    tree.ancestors(deepest)
        .filter(|&id| tree.kind(id).is_element_like())
        .any(|element| {
            match (
                tree.opening_delimiter_end(element),
                tree.closing_delimiter_start(element),
            ) {
                (Some(open_end), Some(close_start)) => open_end <= offset && offset <= close_start,
                _ => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classify_marked(marked: &str) -> bool {
        let offset = marked.find('|').expect("fixture needs a cursor");
        classify_tree(&marked.replacen('|', "", 1), offset)
    }

    #[rstest]
    #[case("const el = <div>he|llo</div>;")]
    #[case("const el = <div>|</div>;")]
    #[case("const el = <div>hello|</div>;")]
    #[case("const el = <div> | </div>;")]
    #[case("const el = <>fr|ag</>;")]
    #[case("const el = <p>a &amp|; b</p>;")]
    #[case("const el = <p><br/>|<br/></p>;")]
    #[case("const el = <p>Don't st|op</p>;")]
    #[case("function A() { return cond && <b>ye|s</b>; }")]
    fn text_content(#[case] marked: &str) {
        assert!(classify_marked(marked), "{marked}");
    }

    #[rstest]
    #[case("const el = <div cl|assName=\"a\">x</div>;")]
    #[case("const el = <d|iv>x</div>;")]
    #[case("const el = <div |>x</div>;")]
    #[case("const el = <div>x</d|iv>;")]
    #[case("const el = <div>{na|me}</div>;")]
    #[case("const el = <div>{ok && <b>X|</b>}</div>;")]
    #[case("const el = <a title={<i>X|</i>}>t</a>;")]
    #[case("const el = <|>x</>;")]
    #[case("const el = <div>x</div>|;")]
    #[case("const [s] = useState<str|ing>('');")]
    #[case("const ok = a <| b;")]
    #[case("const s = \"<b>x|</b>\";")]
    fn not_text_content(#[case] marked: &str) {
        assert!(!classify_marked(marked), "{marked}");
    }

    #[test]
    fn no_markup_short_circuits() {
        let tree = parse("let x = 1 < 2;");
        assert!(!tree.has_markup());
        assert!(!classify_in_tree(&tree, 5));
    }

    #[test]
    fn out_of_range_offset() {
        assert!(!classify_tree("<p>x</p>", 9));
        assert!(!classify_tree("", 0));
    }

    #[test]
    fn end_of_buffer_outside_root() {
        let text = "<p>x</p>";
        assert!(!classify_tree(text, text.len()));
    }
}
