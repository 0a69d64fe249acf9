//! Where a provider's text comes from.
//!
//! Normally the text is read from the backing file or its document
//! ([`ContentSource::FileBacked`]). While an edit is in flight the provider
//! switches to [`ContentSource::TreeBacked`], which reads the text of the
//! parsed file's tree and keeps that tree alive until the edit is committed.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::ViewProvider;
use crate::project::{Document, Project};
use crate::psi::ParsedFile;
use crate::syntax::FileElement;
use crate::vfs::VirtualFile;

/// Which [`ContentSource`] a provider currently reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    FileBacked,
    TreeBacked,
}

pub(crate) enum ContentSource {
    FileBacked,
    TreeBacked(TreeContent),
}

impl ContentSource {
    pub(crate) fn tree_backed(provider: &ViewProvider, file: Arc<ParsedFile>, stamp: u64) -> Self {
        Self::TreeBacked(TreeContent::new(provider, file, stamp))
    }

    pub(crate) fn kind(&self) -> ContentKind {
        match self {
            Self::FileBacked => ContentKind::FileBacked,
            Self::TreeBacked(_) => ContentKind::TreeBacked,
        }
    }

    pub(crate) fn text(&self, provider: &ViewProvider) -> Arc<str> {
        match self {
            Self::FileBacked => file_text(provider),
            Self::TreeBacked(tree) => tree.text(provider.project()),
        }
    }

    pub(crate) fn modification_stamp(&self, provider: &ViewProvider) -> u64 {
        match self {
            Self::FileBacked => file_stamp(provider),
            Self::TreeBacked(tree) => tree.stamp,
        }
    }

    pub(crate) fn describe<'a>(&'a self, file: &'a dyn VirtualFile) -> impl fmt::Display + 'a {
        ContentDisplay { source: self, file }
    }
}

// ============================================================================
// FILE-BACKED
// ============================================================================

fn file_text(provider: &ViewProvider) -> Arc<str> {
    let file = provider.virtual_file();
    if file.is_light() {
        if let Some(document) = provider.cached_document() {
            return committed_text(provider.project(), &document);
        }
        return file.light_text().unwrap_or_else(|| Arc::from(""));
    }

    match provider.document() {
        Some(document) => committed_text(provider.project(), &document),
        None => load_text(file.as_ref()),
    }
}

fn file_stamp(provider: &ViewProvider) -> u64 {
    let file = provider.virtual_file();
    let document = if file.is_light() {
        provider.cached_document()
    } else {
        provider.document()
    };
    match document {
        Some(document) => provider
            .project()
            .document_manager()
            .last_committed_stamp(&document),
        None => file.modification_stamp(),
    }
}

fn committed_text(project: &Project, document: &Document) -> Arc<str> {
    project
        .read_access()
        .read(|| project.document_manager().last_committed_text(document))
}

fn load_text(file: &dyn VirtualFile) -> Arc<str> {
    match file.load_text() {
        Ok(text) => text.into(),
        Err(err) => {
            tracing::warn!(file = %file.path().display(), error = %err, "cannot load file text");
            Arc::from("")
        }
    }
}

// ============================================================================
// TREE-BACKED
// ============================================================================

pub(crate) struct TreeContent {
    file: Arc<ParsedFile>,
    stamp: u64,
    // Strong references keep the trees alive until the source is replaced.
    pinned: Vec<Arc<FileElement>>,
    text: OnceCell<Arc<str>>,
}

impl TreeContent {
    fn new(provider: &ViewProvider, file: Arc<ParsedFile>, stamp: u64) -> Self {
        let mut files = provider.cached_files();
        if !files.iter().any(|known| Arc::ptr_eq(known, &file)) {
            files.push(Arc::clone(&file));
        }
        let pinned = files
            .iter()
            .filter(|parsed| parsed.kind().has_tree())
            .filter_map(|parsed| parsed.calc_tree_element())
            .collect();
        Self {
            file,
            stamp,
            pinned,
            text: OnceCell::new(),
        }
    }

    fn text(&self, project: &Project) -> Arc<str> {
        self.text
            .get_or_init(|| {
                project.read_access().read(|| {
                    self.file
                        .calc_tree_element()
                        .map(|tree| Arc::from(tree.text()))
                        .unwrap_or_else(|| Arc::from(""))
                })
            })
            .clone()
    }
}

struct ContentDisplay<'a> {
    source: &'a ContentSource,
    file: &'a dyn VirtualFile,
}

impl fmt::Display for ContentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ContentSource::FileBacked => write!(f, "FileBacked{{size={}}}", self.file.length()),
            ContentSource::TreeBacked(tree) => write!(
                f,
                "TreeBacked{{stamp={}, pinned={}}}",
                tree.stamp,
                tree.pinned.len()
            ),
        }
    }
}
