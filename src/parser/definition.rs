use rowan::GreenNode;
use rustc_hash::FxHashSet;

use super::{SyntaxKind, parse_tokens};
use crate::lang::ParserDefinition;

/// Parser definition backed by the built-in token parser.
///
/// Leaves whose kind was passed to [`with_references`](Self::with_references)
/// carry a reference, so `find_reference_at` resolves on them.
#[derive(Debug, Clone, Default)]
pub struct TokenParserDefinition {
    reference_kinds: FxHashSet<SyntaxKind>,
}

impl TokenParserDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_references(kinds: impl IntoIterator<Item = SyntaxKind>) -> Self {
        Self {
            reference_kinds: kinds.into_iter().collect(),
        }
    }
}

impl ParserDefinition for TokenParserDefinition {
    fn parse(&self, text: &str) -> GreenNode {
        parse_tokens(text)
    }

    fn is_reference(&self, kind: SyntaxKind) -> bool {
        self.reference_kinds.contains(&kind)
    }
}
