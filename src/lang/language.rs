//! Languages a file can be parsed as.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use smol_str::SmolStr;

static ANY: Lazy<Language> = Lazy::new(|| Language::new("any"));
static PLAIN_TEXT: Lazy<Language> = Lazy::new(|| Language::new("TEXT"));

/// A language, identified by its id.
///
/// Languages form a shallow hierarchy: a dialect names the language it
/// extends, and [`Language::is_kind_of`] walks that chain. Every language is a
/// kind of [`Language::any`].
#[derive(Clone)]
pub struct Language(Arc<LanguageData>);

struct LanguageData {
    id: SmolStr,
    base: Option<Language>,
}

impl Language {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(Arc::new(LanguageData {
            id: id.into(),
            base: None,
        }))
    }

    /// A language that extends `base`.
    pub fn dialect(id: impl Into<SmolStr>, base: Language) -> Self {
        Self(Arc::new(LanguageData {
            id: id.into(),
            base: Some(base),
        }))
    }

    /// Sentinel for files without a meaningful language (binary files).
    pub fn any() -> Language {
        ANY.clone()
    }

    /// Sentinel for unrecognised and oversized text files.
    pub fn plain_text() -> Language {
        PLAIN_TEXT.clone()
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn base(&self) -> Option<&Language> {
        self.0.base.as_ref()
    }

    /// True when `self` is `other` or one of its dialects.
    pub fn is_kind_of(&self, other: &Language) -> bool {
        if *other == *ANY {
            return true;
        }
        let mut current = Some(self);
        while let Some(language) = current {
            if language == other {
                return true;
            }
            current = language.base();
        }
        false
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.id == other.0.id
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language({})", self.0.id)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.id)
    }
}
