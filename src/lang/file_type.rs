//! File types and the registry mapping file names to them.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use smol_str::SmolStr;

use super::Language;
use crate::vfs::VirtualFile;

static PLAIN_TEXT: Lazy<FileType> =
    Lazy::new(|| FileType::language("PLAIN_TEXT", "txt", Language::plain_text()));
static UNKNOWN: Lazy<FileType> = Lazy::new(|| FileType::binary("UNKNOWN", ""));

/// Default list of ignored file names, `;`-separated. A leading `*` matches any prefix.
pub const DEFAULT_IGNORED_FILES: &str = "*.hprof;*.pyc;*.pyo;*.rbc;*.yarb;*~;.DS_Store;.git;.hg;.svn;CVS;__pycache__;_svn;vssver.scc;vssver2.scc";

/// What kind of content a file type describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTypeKind {
    /// Raw bytes; never parsed.
    Binary,
    /// Text without a language of its own.
    Text,
    /// Text in the given language.
    Language(Language),
}

/// A file type, cheap to clone.
#[derive(Clone)]
pub struct FileType(Arc<FileTypeData>);

struct FileTypeData {
    name: SmolStr,
    default_extension: SmolStr,
    kind: FileTypeKind,
}

impl FileType {
    pub fn new(
        name: impl Into<SmolStr>,
        default_extension: impl Into<SmolStr>,
        kind: FileTypeKind,
    ) -> Self {
        Self(Arc::new(FileTypeData {
            name: name.into(),
            default_extension: default_extension.into(),
            kind,
        }))
    }

    pub fn language(
        name: impl Into<SmolStr>,
        default_extension: impl Into<SmolStr>,
        language: Language,
    ) -> Self {
        Self::new(name, default_extension, FileTypeKind::Language(language))
    }

    pub fn binary(name: impl Into<SmolStr>, default_extension: impl Into<SmolStr>) -> Self {
        Self::new(name, default_extension, FileTypeKind::Binary)
    }

    pub fn text(name: impl Into<SmolStr>, default_extension: impl Into<SmolStr>) -> Self {
        Self::new(name, default_extension, FileTypeKind::Text)
    }

    pub fn plain_text() -> FileType {
        PLAIN_TEXT.clone()
    }

    /// The type of files no registered type claims. Treated as binary.
    pub fn unknown() -> FileType {
        UNKNOWN.clone()
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn default_extension(&self) -> &str {
        &self.0.default_extension
    }

    pub fn kind(&self) -> &FileTypeKind {
        &self.0.kind
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.0.kind, FileTypeKind::Binary)
    }

    /// The language declared by a language file type.
    pub fn declared_language(&self) -> Option<&Language> {
        match &self.0.kind {
            FileTypeKind::Language(language) => Some(language),
            _ => None,
        }
    }
}

impl PartialEq for FileType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for FileType {}

impl fmt::Debug for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileType({})", self.0.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum IgnorePattern {
    Name(SmolStr),
    Suffix(SmolStr),
}

impl IgnorePattern {
    fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return None;
        }
        Some(match pattern.strip_prefix('*') {
            Some(suffix) => Self::Suffix(suffix.into()),
            None => Self::Name(pattern.into()),
        })
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Name(expected) => name == expected,
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
        }
    }
}

/// Maps file names to file types and decides which files are ignored.
#[derive(Debug, Clone)]
pub struct FileTypeRegistry {
    by_extension: IndexMap<SmolStr, FileType>,
    ignored: Vec<IgnorePattern>,
}

impl FileTypeRegistry {
    /// An empty registry that ignores nothing.
    pub fn empty() -> Self {
        Self {
            by_extension: IndexMap::new(),
            ignored: Vec::new(),
        }
    }

    /// Register `file_type` under its default extension.
    pub fn register(&mut self, file_type: FileType) {
        let extension = SmolStr::new(file_type.default_extension());
        if !extension.is_empty() {
            self.by_extension.insert(extension, file_type);
        }
    }

    /// Associate an additional extension with `file_type`.
    pub fn associate(&mut self, extension: impl Into<SmolStr>, file_type: FileType) {
        self.by_extension.insert(extension.into(), file_type);
    }

    /// Replace the ignore list with a `;`-separated pattern list.
    pub fn set_ignored_files(&mut self, patterns: &str) {
        self.ignored = patterns.split(';').filter_map(IgnorePattern::parse).collect();
    }

    pub fn file_type_for_name(&self, name: &str) -> FileType {
        name.rsplit_once('.')
            .and_then(|(_, extension)| self.by_extension.get(extension))
            .cloned()
            .unwrap_or_else(FileType::unknown)
    }

    pub fn is_file_name_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|pattern| pattern.matches(name))
    }

    pub fn is_file_ignored(&self, file: &dyn VirtualFile) -> bool {
        self.is_file_name_ignored(file.name())
    }
}

impl Default for FileTypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(FileType::plain_text());
        registry.set_ignored_files(DEFAULT_IGNORED_FILES);
        registry
    }
}
