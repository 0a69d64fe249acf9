//! Editor documents and their commit snapshots.
//!
//! A [`Document`] holds the live, editable text of a file. The document
//! manager separately remembers the last *committed* text and stamp: the
//! snapshot parsed files are kept consistent with. Committed text lags the
//! live text until [`InMemoryDocumentManager::commit_document`] is called.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::FileId;
use crate::base::stamp::current_time;
use crate::vfs::{FileSizeLimits, VirtualFile};

/// The in-memory, editable text of a file.
#[derive(Debug)]
pub struct Document {
    file: FileId,
    text: RwLock<Arc<str>>,
    stamp: AtomicU64,
}

impl Document {
    pub fn new(file: FileId, text: impl Into<Arc<str>>, stamp: u64) -> Self {
        Self {
            file,
            text: RwLock::new(text.into()),
            stamp: AtomicU64::new(stamp),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// The live text.
    pub fn text(&self) -> Arc<str> {
        self.text.read().clone()
    }

    pub fn text_len(&self) -> usize {
        self.text.read().len()
    }

    /// Replace the live text and bump the stamp.
    pub fn set_text(&self, text: impl Into<Arc<str>>) {
        *self.text.write() = text.into();
        self.stamp.store(current_time(), Ordering::Release);
    }

    pub fn modification_stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }
}

/// Source of documents and of their committed snapshots.
pub trait DocumentManager: Send + Sync {
    /// The document of `file` if one exists already. Never creates one.
    fn cached_document(&self, file: &dyn VirtualFile) -> Option<Arc<Document>>;

    /// The document of `file`, creating it when possible. May block on I/O.
    fn document(&self, file: &dyn VirtualFile) -> Option<Arc<Document>>;

    fn last_committed_text(&self, document: &Document) -> Arc<str>;

    fn last_committed_stamp(&self, document: &Document) -> u64;
}

#[derive(Debug, Clone)]
struct Snapshot {
    text: Arc<str>,
    stamp: u64,
}

/// Keeps every document it hands out until it is released.
#[derive(Debug)]
pub struct InMemoryDocumentManager {
    limits: FileSizeLimits,
    documents: RwLock<FxHashMap<FileId, Arc<Document>>>,
    committed: RwLock<FxHashMap<FileId, Snapshot>>,
}

impl InMemoryDocumentManager {
    pub fn new(limits: FileSizeLimits) -> Self {
        Self {
            limits,
            documents: RwLock::new(FxHashMap::default()),
            committed: RwLock::new(FxHashMap::default()),
        }
    }

    /// Make the document's live text its committed text.
    pub fn commit_document(&self, document: &Document) {
        let snapshot = Snapshot {
            text: document.text(),
            stamp: document.modification_stamp(),
        };
        self.committed.write().insert(document.file(), snapshot);
    }

    /// True when the live text differs from the committed one.
    pub fn is_uncommitted(&self, document: &Document) -> bool {
        self.committed
            .read()
            .get(&document.file())
            .is_some_and(|snapshot| snapshot.stamp != document.modification_stamp())
    }

    /// Forget the document of `file`.
    pub fn release(&self, file: &dyn VirtualFile) {
        self.documents.write().remove(&file.id());
        self.committed.write().remove(&file.id());
    }

    fn can_have_document(&self, file: &dyn VirtualFile) -> bool {
        !file.is_directory()
            && !file.is_special()
            && !file.file_type().is_binary()
            && !self.limits.is_too_large_for_content_loading(file)
    }
}

impl DocumentManager for InMemoryDocumentManager {
    fn cached_document(&self, file: &dyn VirtualFile) -> Option<Arc<Document>> {
        self.documents.read().get(&file.id()).cloned()
    }

    fn document(&self, file: &dyn VirtualFile) -> Option<Arc<Document>> {
        if let Some(document) = self.cached_document(file) {
            return Some(document);
        }
        if !self.can_have_document(file) {
            return None;
        }

        let text: Arc<str> = match file.light_text() {
            Some(text) => text,
            None => match file.load_text() {
                Ok(text) => text.into(),
                Err(err) => {
                    tracing::warn!(file = file.name(), error = %err, "cannot load document text");
                    return None;
                }
            },
        };
        let created = Arc::new(Document::new(file.id(), text, file.modification_stamp()));

        let mut documents = self.documents.write();
        let document = documents
            .entry(file.id())
            .or_insert_with(|| {
                self.commit_document(&created);
                created
            })
            .clone();
        Some(document)
    }

    fn last_committed_text(&self, document: &Document) -> Arc<str> {
        match self.committed.read().get(&document.file()) {
            Some(snapshot) => snapshot.text.clone(),
            None => document.text(),
        }
    }

    fn last_committed_stamp(&self, document: &Document) -> u64 {
        match self.committed.read().get(&document.file()) {
            Some(snapshot) => snapshot.stamp,
            None => document.modification_stamp(),
        }
    }
}
