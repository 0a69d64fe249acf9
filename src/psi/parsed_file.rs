use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use text_size::TextSize;

use crate::lang::Language;
use crate::parser;
use crate::parser::SyntaxKind;
use crate::provider::ViewProvider;
use crate::syntax::FileElement;

/// The variants of a parsed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedFileKind {
    /// Raw bytes, no text and no tree.
    Binary,
    /// Text with a single-leaf tree.
    Plaintext,
    /// A file too large to load; reports its length only.
    LargePlaintext,
    /// Text parsed by its language's parser definition.
    LanguageParsed,
}

impl ParsedFileKind {
    /// True for the kinds that build a tree from the text.
    pub fn has_tree(self) -> bool {
        matches!(self, Self::Plaintext | Self::LanguageParsed)
    }
}

/// A parsed source unit owned by a [`ViewProvider`].
///
/// The file refers back to its provider weakly; a parsed file whose
/// provider was dropped can no longer build its tree.
pub struct ParsedFile {
    kind: ParsedFileKind,
    language: Language,
    provider: Weak<ViewProvider>,
    tree: RwLock<Option<Arc<FileElement>>>,
    valid: AtomicBool,
    invalidations: Arc<AtomicU32>,
}

impl ParsedFile {
    pub fn new(kind: ParsedFileKind, provider: &ViewProvider) -> Self {
        Self {
            kind,
            language: provider.base_language().clone(),
            provider: provider.downgrade(),
            tree: RwLock::new(None),
            valid: AtomicBool::new(true),
            invalidations: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn binary(provider: &ViewProvider) -> Self {
        Self::new(ParsedFileKind::Binary, provider)
    }

    pub fn plain_text(provider: &ViewProvider) -> Self {
        Self::new(ParsedFileKind::Plaintext, provider)
    }

    pub fn large_plain_text(provider: &ViewProvider) -> Self {
        Self::new(ParsedFileKind::LargePlaintext, provider)
    }

    pub fn language_parsed(provider: &ViewProvider) -> Self {
        Self::new(ParsedFileKind::LanguageParsed, provider)
    }

    pub fn kind(&self) -> ParsedFileKind {
        self.kind
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// The owning provider, while it is alive.
    pub fn provider(&self) -> Option<Arc<ViewProvider>> {
        self.provider.upgrade()
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Mark the file invalid. Returns true if it was valid until now.
    pub fn mark_invalidated(&self) -> bool {
        self.invalidations.fetch_add(1, Ordering::AcqRel);
        let was_valid = self.valid.swap(false, Ordering::AcqRel);
        if was_valid {
            tracing::trace!(kind = ?self.kind, language = %self.language, "parsed file invalidated");
        }
        was_valid
    }

    /// How many times [`mark_invalidated`](Self::mark_invalidated) was called.
    pub fn invalidation_count(&self) -> u32 {
        self.invalidations.load(Ordering::Acquire)
    }

    /// Shared handle on the invalidation counter. It stays readable after
    /// the file itself is dropped.
    pub fn invalidation_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.invalidations)
    }

    /// The tree, if it has been built.
    pub fn tree_element(&self) -> Option<Arc<FileElement>> {
        self.tree.read().clone()
    }

    pub fn is_contents_loaded(&self) -> bool {
        self.tree.read().is_some()
    }

    /// The tree, building it from the provider's content when needed.
    ///
    /// Returns `None` for kinds without a tree and for files whose provider
    /// is gone.
    pub fn calc_tree_element(&self) -> Option<Arc<FileElement>> {
        if !self.kind.has_tree() {
            return None;
        }
        if let Some(tree) = self.tree_element() {
            return Some(tree);
        }

        let provider = self.provider()?;
        let text = provider.contents();
        let green = match self.kind {
            ParsedFileKind::LanguageParsed => provider
                .project()
                .parser_definitions()
                .for_language(&self.language)
                .map(|definition| definition.parse(&text))
                .unwrap_or_else(|| parser::plain_text(&text)),
            _ => parser::plain_text(&text),
        };

        let mut slot = self.tree.write();
        let tree = slot.get_or_insert_with(|| Arc::new(FileElement::new(green)));
        Some(Arc::clone(tree))
    }

    /// True when leaves of `kind` carry a reference in this file's language.
    pub fn is_reference_kind(&self, kind: SyntaxKind) -> bool {
        if self.kind != ParsedFileKind::LanguageParsed {
            return false;
        }
        self.provider()
            .and_then(|provider| {
                provider
                    .project()
                    .parser_definitions()
                    .for_language(&self.language)
            })
            .is_some_and(|definition| definition.is_reference(kind))
    }

    /// Length of the file's text.
    pub fn text_len(&self) -> u64 {
        if let Some(tree) = self.tree_element() {
            return u32::from(tree.text_len()).into();
        }
        let Some(provider) = self.provider() else {
            return 0;
        };
        match self.kind {
            ParsedFileKind::Binary => 0,
            ParsedFileKind::LargePlaintext => provider.virtual_file().length(),
            ParsedFileKind::Plaintext | ParsedFileKind::LanguageParsed => {
                provider.contents().len() as u64
            }
        }
    }

    /// The text of the file's tree. `None` for kinds without a tree.
    pub fn text(&self) -> Option<String> {
        self.calc_tree_element().map(|tree| tree.text())
    }

    /// Length of the built tree, if any.
    pub fn tree_text_len(&self) -> Option<TextSize> {
        self.tree_element().map(|tree| tree.text_len())
    }
}

impl fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFile")
            .field("kind", &self.kind)
            .field("language", &self.language)
            .field("valid", &self.is_valid())
            .field("loaded", &self.is_contents_loaded())
            .finish()
    }
}
