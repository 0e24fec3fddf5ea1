//! # Classification
//!
//! Answers one question: is the cursor in plain element text content?
//!
//! ```text
//!                   ┌─ MarkupOnly ─────► markup::classify_markup
//! Probe ─ dialect ──┤
//!                   └─ CodeWithMarkup ─┬─ SyntaxTree ─► tree::classify_tree
//!                                      └─ Heuristic ──► heuristic::classify_code
//! ```
//!
//! Both code strategies implement the same contract; the syntax-tree one is
//! the default, the heuristic one avoids a parse. Every entry point is a pure
//! function of its inputs and falls back to `false` for anything it cannot
//! make sense of.

pub mod cache;
pub mod heuristic;
pub mod markup;
pub mod tree;

use serde::{Deserialize, Serialize};

use crate::models::{Dialect, Probe};

pub use cache::{CacheEntry, CachedClassifier, Clock, ResultCache, SystemClock};
pub use heuristic::classify_code;
pub use markup::classify_markup;
pub use tree::classify_tree;

/// Which implementation handles code-with-markup probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    SyntaxTree,
    Heuristic,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "syntax-tree" => Ok(Self::SyntaxTree),
            "heuristic" => Ok(Self::Heuristic),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

/// Classify with the default strategy.
pub fn classify(probe: &Probe<'_>) -> bool {
    classify_with(probe, Strategy::default())
}

pub fn classify_with(probe: &Probe<'_>, strategy: Strategy) -> bool {
    if !probe.offset_in_range() {
        return false;
    }
    let verdict = match (probe.dialect, strategy) {
        (Dialect::MarkupOnly, _) => classify_markup(probe.text, probe.offset),
        (Dialect::CodeWithMarkup, Strategy::SyntaxTree) => classify_tree(probe.text, probe.offset),
        (Dialect::CodeWithMarkup, Strategy::Heuristic) => classify_code(probe.text, probe.offset),
    };
    log::trace!(
        "{}:{} {:?}/{:?} -> {verdict}",
        probe.source_id,
        probe.offset,
        probe.dialect,
        strategy
    );
    verdict
}

/// Boundary helper for callers holding an editor language identifier.
///
/// Unsupported identifiers are `false` without running any scanner.
pub fn classify_language(language_id: &str, source_id: &str, text: &str, offset: usize) -> bool {
    Probe::for_language(language_id, source_id, text, offset).is_some_and(|probe| classify(&probe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn classify_is_idempotent() {
        let probe = Probe::new(Dialect::CodeWithMarkup, "a.tsx", "<p>hello</p>", 5);
        let first = classify(&probe);
        assert_eq!(first, classify(&probe));
        assert!(first);
    }

    #[rstest]
    #[case("python")]
    #[case("typescript")]
    #[case("")]
    fn unsupported_language_is_false(#[case] language_id: &str) {
        assert!(!classify_language(language_id, "x", "<p>hello</p>", 5));
    }

    #[test]
    fn markup_dialect_dispatches_to_markup_scanner() {
        // Trailing text after the last tag counts for markup but not for code
        let text = "<p>x</p>";
        assert!(classify_language("html", "a.html", text, text.len()));
        assert!(!classify_language("javascriptreact", "a.jsx", text, text.len()));
    }

    #[rstest]
    #[case(Strategy::SyntaxTree)]
    #[case(Strategy::Heuristic)]
    fn empty_input_is_false(#[case] strategy: Strategy) {
        let probe = Probe::new(Dialect::CodeWithMarkup, "a.tsx", "", 0);
        assert!(!classify_with(&probe, strategy));
    }

    #[rstest]
    #[case(Strategy::SyntaxTree)]
    #[case(Strategy::Heuristic)]
    fn out_of_range_is_false(#[case] strategy: Strategy) {
        let probe = Probe::new(Dialect::CodeWithMarkup, "a.tsx", "<p>x</p>", 42);
        assert!(!classify_with(&probe, strategy));
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!("heuristic".parse::<Strategy>(), Ok(Strategy::Heuristic));
        assert_eq!("syntax-tree".parse::<Strategy>(), Ok(Strategy::SyntaxTree));
        assert!("regex".parse::<Strategy>().is_err());
    }
}
