//! Parser definitions and their per-language registry.

use std::sync::Arc;

use rowan::GreenNode;
use rustc_hash::FxHashMap;

use super::Language;
use crate::error::Result;
use crate::parser::SyntaxKind;
use crate::provider::ViewProvider;
use crate::psi::ParsedFile;

/// Knows how to build trees for one language.
pub trait ParserDefinition: Send + Sync {
    /// Parse `text` into a lossless green tree.
    fn parse(&self, text: &str) -> GreenNode;

    /// True when leaves of `kind` carry a reference.
    fn is_reference(&self, kind: SyntaxKind) -> bool {
        let _ = kind;
        false
    }

    /// Build the parsed file for `provider`.
    ///
    /// The tree itself is built lazily, on first access, through [`parse`](Self::parse).
    fn create_file(&self, provider: &ViewProvider) -> Result<Option<ParsedFile>> {
        Ok(Some(ParsedFile::language_parsed(provider)))
    }
}

/// Parser definitions keyed by language.
#[derive(Default, Clone)]
pub struct ParserDefinitions {
    by_language: FxHashMap<Language, Arc<dyn ParserDefinition>>,
}

impl ParserDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, language: Language, definition: impl ParserDefinition + 'static) {
        self.by_language.insert(language, Arc::new(definition));
    }

    pub fn for_language(&self, language: &Language) -> Option<Arc<dyn ParserDefinition>> {
        self.by_language.get(language).cloned()
    }
}
