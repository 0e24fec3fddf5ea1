use std::path::Path;

/// The grammar family of the text being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// HTML, XML, SVG and friends: tags and text, nothing else
    MarkupOnly,
    /// JavaScript/TypeScript with embedded tags (JSX/TSX)
    CodeWithMarkup,
}

const MARKUP_ONLY_IDS: &[&str] = &["html", "xml", "svg", "xhtml", "xsl", "vue-html"];

// `typescript` is deliberately absent: in .ts files `<T>value` is a type
// assertion, never a tag.
const CODE_WITH_MARKUP_IDS: &[&str] = &["javascript", "javascriptreact", "typescriptreact"];

impl Dialect {
    /// Resolve an editor language identifier. `None` means unsupported.
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        if MARKUP_ONLY_IDS.contains(&language_id) {
            Some(Self::MarkupOnly)
        } else if CODE_WITH_MARKUP_IDS.contains(&language_id) {
            Some(Self::CodeWithMarkup)
        } else {
            None
        }
    }

    /// Guess the language identifier from a file extension.
    pub fn language_id_for_path(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let id = match ext.as_str() {
            "html" | "htm" => "html",
            "xml" => "xml",
            "svg" => "svg",
            "xhtml" => "xhtml",
            "xsl" | "xslt" => "xsl",
            "js" | "mjs" | "cjs" => "javascript",
            "jsx" => "javascriptreact",
            "tsx" => "typescriptreact",
            _ => return None,
        };
        Some(id)
    }

    pub fn is_markup_only(self) -> bool {
        self == Self::MarkupOnly
    }
}
