use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use text_size::TextSize;

use super::content::{ContentKind, ContentSource};
use super::{factory, resolver};
use crate::base::stamp::current_time;
use crate::error::Result;
use crate::lang::{FileType, Language};
use crate::project::{Document, Project};
use crate::psi::ParsedFile;
use crate::syntax::{self, FileElement, Reference, TreeElement};
use crate::vfs::{DONT_RECORD_UNDO, LightVirtualFile, VirtualFile};

/// Binds one virtual file to its lazily built [`ParsedFile`].
///
/// A provider is always shared through an `Arc`. Its base language is fixed
/// at construction. The parsed file is created on the first
/// [`parsed`](Self::parsed) call; concurrent first callers race through a
/// compare-and-set and every caller gets the winning instance.
///
/// Text is read through a [`ContentSource`] that is swapped atomically:
/// file-backed normally, tree-backed between [`before_document_changed`]
/// and [`contents_synchronized`].
///
/// [`before_document_changed`]: Self::before_document_changed
/// [`contents_synchronized`]: Self::contents_synchronized
pub struct ViewProvider {
    this: Weak<ViewProvider>,
    project: Arc<Project>,
    file: Arc<dyn VirtualFile>,
    base_language: Language,
    events_enabled: bool,
    physical: bool,
    parsed: ArcSwapOption<ParsedFile>,
    content: ArcSwap<ContentSource>,
    document: Mutex<Weak<Document>>,
    inconsistent_trees: AtomicU32,
}

impl ViewProvider {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// A provider with project events enabled.
    pub fn new(project: Arc<Project>, file: Arc<dyn VirtualFile>) -> Arc<Self> {
        Self::with_events(project, file, true)
    }

    pub fn with_events(
        project: Arc<Project>,
        file: Arc<dyn VirtualFile>,
        events_enabled: bool,
    ) -> Arc<Self> {
        let file_type = file.file_type();
        Self::with_file_type(project, file, events_enabled, &file_type)
    }

    /// A provider whose language is resolved as if `file` had `file_type`.
    pub fn with_file_type(
        project: Arc<Project>,
        file: Arc<dyn VirtualFile>,
        events_enabled: bool,
        file_type: &FileType,
    ) -> Arc<Self> {
        let language = resolver::base_language(file.as_ref(), &project, file_type);
        Self::with_language(project, file, events_enabled, language)
    }

    /// A provider bound to `language` without running language resolution.
    pub fn with_language(
        project: Arc<Project>,
        file: Arc<dyn VirtualFile>,
        events_enabled: bool,
        language: Language,
    ) -> Arc<Self> {
        let physical =
            events_enabled && !file.is_light() && file.file_system().is_physical();
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            project,
            file,
            base_language: language,
            events_enabled,
            physical,
            parsed: ArcSwapOption::empty(),
            content: ArcSwap::from_pointee(ContentSource::FileBacked),
            document: Mutex::new(Weak::new()),
            inconsistent_trees: AtomicU32::new(0),
        })
    }

    /// A provider over `copy` with events disabled and the same base language.
    pub fn create_copy(&self, copy: Arc<dyn VirtualFile>) -> Arc<ViewProvider> {
        Self::with_language(
            Arc::clone(&self.project),
            copy,
            false,
            self.base_language.clone(),
        )
    }

    /// A non-physical copy over a light file holding the current contents.
    pub fn clone_view(&self) -> Arc<ViewProvider> {
        let original = &self.file;
        let copy = LightVirtualFile::new(original.name(), original.file_type(), self.contents())
            .with_charset(original.charset())
            .with_stamp(self.modification_stamp())
            .with_original(Arc::clone(original));
        copy.user_data().put(&DONT_RECORD_UNDO, Some(true));
        self.create_copy(Arc::new(copy))
    }

    pub(crate) fn downgrade(&self) -> Weak<ViewProvider> {
        self.this.clone()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn project(&self) -> &Arc<Project> {
        &self.project
    }

    pub fn virtual_file(&self) -> &Arc<dyn VirtualFile> {
        &self.file
    }

    pub fn base_language(&self) -> &Language {
        &self.base_language
    }

    /// Always exactly the base language.
    pub fn languages(&self) -> FxHashSet<Language> {
        let mut languages = FxHashSet::default();
        languages.insert(self.base_language.clone());
        languages
    }

    pub fn is_event_system_enabled(&self) -> bool {
        self.events_enabled
    }

    /// True for providers over persistent files that take part in project events.
    pub fn is_physical(&self) -> bool {
        self.physical
    }

    pub fn supports_incremental_reparse(&self, _root_language: &Language) -> bool {
        true
    }

    // ========================================================================
    // PARSED FILES
    // ========================================================================

    /// The parsed file for `target`, building it on first use.
    ///
    /// `None` when `target` is not the base language or when no parsed file
    /// could be built. Non-physical providers register themselves with the
    /// project's file manager here.
    pub fn parsed(&self, target: &Language) -> Result<Option<Arc<ParsedFile>>> {
        if !self.physical {
            self.register_if_absent();
        }
        self.parsed_inner(target)
    }

    fn parsed_inner(&self, target: &Language) -> Result<Option<Arc<ParsedFile>>> {
        if *target != self.base_language {
            return Ok(None);
        }
        if let Some(parsed) = self.parsed.load_full() {
            return Ok(Some(parsed));
        }

        let Some(created) = factory::create_file(self)? else {
            return Ok(None);
        };
        let created = Arc::new(created);
        let previous = self
            .parsed
            .compare_and_swap(&None::<Arc<ParsedFile>>, Some(Arc::clone(&created)));
        match &*previous {
            None => Ok(Some(created)),
            Some(winner) => {
                tracing::trace!(provider = %self, "lost parsed file race");
                created.mark_invalidated();
                Ok(Some(Arc::clone(winner)))
            }
        }
    }

    fn register_if_absent(&self) {
        let file_manager = self.project.file_manager();
        if file_manager.cached_view_provider(self.file.as_ref()).is_some() {
            return;
        }
        if let Some(this) = self.this.upgrade() {
            file_manager.set_view_provider(self.file.as_ref(), Some(&this));
        }
    }

    /// The parsed file for `target` if it was built already.
    pub fn cached_parsed(&self, target: &Language) -> Option<Arc<ParsedFile>> {
        if *target != self.base_language {
            return None;
        }
        self.parsed.load_full()
    }

    /// Zero or one parsed files.
    pub fn all_files(&self) -> Result<Vec<Arc<ParsedFile>>> {
        Ok(self.parsed(&self.base_language)?.into_iter().collect())
    }

    pub(crate) fn cached_files(&self) -> Vec<Arc<ParsedFile>> {
        self.parsed.load_full().into_iter().collect()
    }

    /// The base-language parsed file.
    ///
    /// # Panics
    ///
    /// When no parsed file can be built for this provider.
    pub fn stub_binding_root(&self) -> Result<Arc<ParsedFile>> {
        match self.parsed(&self.base_language)? {
            Some(parsed) => Ok(parsed),
            None => panic!("no parsed file to bind stubs to in {self}"),
        }
    }

    /// Install `parsed` as the cached parsed file, invalidating the one it replaces.
    pub fn force_cached_parsed(&self, parsed: Arc<ParsedFile>) {
        let previous = self.parsed.swap(Some(Arc::clone(&parsed)));
        if let Some(previous) = previous {
            if !Arc::ptr_eq(&previous, &parsed) {
                tracing::debug!(provider = %self, "cached parsed file replaced");
                previous.mark_invalidated();
            }
        }
        if let Some(this) = self.this.upgrade() {
            self.project
                .file_manager()
                .set_view_provider(self.file.as_ref(), Some(&this));
        }
    }

    /// Invalidate the cached parsed file, if any.
    pub fn mark_invalidated(&self) {
        if let Some(parsed) = self.parsed.load_full() {
            parsed.mark_invalidated();
        }
    }

    /// Roots of the trees built so far: empty, or the parsed file's root.
    pub fn known_tree_roots(&self) -> Vec<Arc<FileElement>> {
        self.parsed
            .load_full()
            .and_then(|parsed| parsed.tree_element())
            .into_iter()
            .collect()
    }

    // ========================================================================
    // CONTENT
    // ========================================================================

    pub fn contents(&self) -> Arc<str> {
        self.content.load_full().text(self)
    }

    pub fn modification_stamp(&self) -> u64 {
        self.content.load_full().modification_stamp(self)
    }

    pub fn content_kind(&self) -> ContentKind {
        self.content.load().kind()
    }

    /// The editor document, obtaining it from the document manager when the
    /// cached one is gone.
    ///
    /// The provider only keeps a weak reference, so the cache hits only while
    /// the document manager (or a caller) holds the document.
    pub fn document(&self) -> Option<Arc<Document>> {
        if let Some(document) = self.document.lock().upgrade() {
            return Some(document);
        }
        let document = self.project.document_manager().document(self.file.as_ref());
        *self.document.lock() = document.as_ref().map(Arc::downgrade).unwrap_or_default();
        document
    }

    /// The editor document if one exists. Never creates one.
    pub fn cached_document(&self) -> Option<Arc<Document>> {
        if let Some(document) = self.document.lock().upgrade() {
            return Some(document);
        }
        self.project
            .document_manager()
            .cached_document(self.file.as_ref())
    }

    pub fn before_contents_synchronized(&self) {}

    /// Return to file-backed content once the document is committed.
    pub fn contents_synchronized(&self) {
        if self.content_kind() == ContentKind::TreeBacked {
            self.set_content(ContentSource::FileBacked);
        }
    }

    /// Pin the tree text before the document changes.
    ///
    /// Pins `cause` when given, else the base-language parsed file. Only
    /// kinds with a tree are pinned.
    pub fn before_document_changed(&self, cause: Option<&Arc<ParsedFile>>) -> Result<()> {
        let parsed = match cause {
            Some(cause) => Some(Arc::clone(cause)),
            None => self.parsed(&self.base_language)?,
        };
        let Some(parsed) = parsed.filter(|parsed| parsed.kind().has_tree()) else {
            return Ok(());
        };
        let stamp = match cause {
            None => self.modification_stamp(),
            Some(_) => current_time(),
        };
        self.set_content(ContentSource::tree_backed(self, parsed, stamp));
        Ok(())
    }

    /// Pin the tree text of `parsed` after its root was replaced.
    pub fn root_changed(&self, parsed: &Arc<ParsedFile>) {
        if parsed.kind().has_tree() && parsed.is_contents_loaded() {
            let source = ContentSource::tree_backed(self, Arc::clone(parsed), current_time());
            self.set_content(source);
        }
    }

    fn set_content(&self, content: ContentSource) {
        let content = Arc::new(content);
        let previous = self.content.swap(Arc::clone(&content));
        if previous.kind() == ContentKind::TreeBacked && content.kind() == ContentKind::FileBacked {
            drop(previous);
            self.check_length_consistency(&content);
        }
    }

    fn check_length_consistency(&self, content: &ContentSource) {
        let file_len = content.text(self).len();
        for root in self.known_tree_roots() {
            let node_len = u32::from(root.text_len()) as usize;
            if node_len != file_len {
                self.inconsistent_trees.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    element_type = ?root.element_type(),
                    node_len,
                    file_len,
                    provider = %self,
                    "inconsistent tree"
                );
            }
        }
    }

    /// How many tree/file length mismatches were detected at commit points.
    pub fn inconsistent_tree_count(&self) -> u32 {
        self.inconsistent_trees.load(Ordering::Relaxed)
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// The leaf at `offset` in the base-language tree.
    pub fn find_element_at(&self, offset: TextSize) -> Result<Option<TreeElement>> {
        let parsed = self.parsed(&self.base_language)?;
        Ok(element_in(parsed.as_deref(), offset))
    }

    /// The leaf at `offset` in the tree for `language`.
    pub fn find_element_at_in(
        &self,
        offset: TextSize,
        language: &Language,
    ) -> Result<Option<TreeElement>> {
        let parsed = self.parsed(language)?;
        Ok(element_in(parsed.as_deref(), offset))
    }

    /// Like [`find_element_at`](Self::find_element_at), but `None` unless the
    /// base language is `language` or one of its dialects.
    pub fn find_element_at_kind(
        &self,
        offset: TextSize,
        language: &Language,
    ) -> Result<Option<TreeElement>> {
        if !self.base_language.is_kind_of(language) {
            return Ok(None);
        }
        self.find_element_at(offset)
    }

    /// The reference at `offset` in the base-language tree.
    pub fn find_reference_at(&self, offset: TextSize) -> Result<Option<Reference>> {
        let parsed = self.parsed(&self.base_language)?;
        Ok(reference_in(parsed.as_deref(), offset))
    }

    pub fn find_reference_at_in(
        &self,
        offset: TextSize,
        language: &Language,
    ) -> Result<Option<Reference>> {
        let parsed = self.parsed(language)?;
        Ok(reference_in(parsed.as_deref(), offset))
    }
}

fn element_in(parsed: Option<&ParsedFile>, offset: TextSize) -> Option<TreeElement> {
    let tree = parsed?.calc_tree_element();
    syntax::element_at(tree.as_deref(), offset)
}

fn reference_in(parsed: Option<&ParsedFile>, offset: TextSize) -> Option<Reference> {
    let parsed = parsed?;
    let tree = parsed.calc_tree_element();
    syntax::reference_at(tree.as_deref(), offset, |kind| parsed.is_reference_kind(kind))
}

impl fmt::Display for ViewProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.content.load_full();
        write!(
            f,
            "ViewProvider{{file={}, content={}}}",
            self.file.path().display(),
            content.describe(self.file.as_ref())
        )
    }
}

impl fmt::Debug for ViewProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewProvider")
            .field("file", &self.file.path())
            .field("base_language", &self.base_language)
            .field("physical", &self.physical)
            .field("parsed", &self.parsed.load_full())
            .field("content", &self.content_kind())
            .finish_non_exhaustive()
    }
}
