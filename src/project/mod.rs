//! Project-scoped services used by view providers.
//!
//! A [`Project`] bundles everything a provider consults besides its file:
//!
//! - [`DocumentManager`] - editor documents and committed snapshots
//! - [`FileManager`] - the file → provider registry
//! - [`DirectoryIndex`], [`FileIndexFacade`] - directory and library lookups
//! - registries for file types, parser definitions and language substitutors
//! - [`ReadAccess`] - the read section guarding tree text
//! - a cancellation token checked while building parsed files
//!
//! Projects are assembled with [`ProjectBuilder`].

mod document;
mod file_manager;
mod read_access;
mod roots;

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

pub use document::{Document, DocumentManager, InMemoryDocumentManager};
pub use file_manager::FileManager;
pub use read_access::ReadAccess;
pub use roots::{DirectoryIndex, FileIndexFacade, ProjectDirectory, ProjectRoots};

use crate::error::{Result, ViewError};
use crate::lang::{FileTypeRegistry, LanguageSubstitutors, ParserDefinitions};
use crate::provider::ViewProvider;
use crate::vfs::{FileSizeLimits, VirtualFile};

/// The services of one project.
pub struct Project {
    name: SmolStr,
    limits: FileSizeLimits,
    documents: Arc<dyn DocumentManager>,
    file_manager: FileManager,
    directories: Arc<dyn DirectoryIndex>,
    index: Arc<dyn FileIndexFacade>,
    file_types: FileTypeRegistry,
    parser_definitions: ParserDefinitions,
    substitutors: LanguageSubstitutors,
    read_access: ReadAccess,
    cancellation: CancellationToken,
}

impl Project {
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn limits(&self) -> &FileSizeLimits {
        &self.limits
    }

    pub fn document_manager(&self) -> &dyn DocumentManager {
        self.documents.as_ref()
    }

    pub fn file_manager(&self) -> &FileManager {
        &self.file_manager
    }

    pub fn directory_index(&self) -> &dyn DirectoryIndex {
        self.directories.as_ref()
    }

    pub fn index_facade(&self) -> &dyn FileIndexFacade {
        self.index.as_ref()
    }

    pub fn file_types(&self) -> &FileTypeRegistry {
        &self.file_types
    }

    pub fn parser_definitions(&self) -> &ParserDefinitions {
        &self.parser_definitions
    }

    pub fn substitutors(&self) -> &LanguageSubstitutors {
        &self.substitutors
    }

    pub fn read_access(&self) -> &ReadAccess {
        &self.read_access
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Fail with [`ViewError::Cancelled`] once the project's token is cancelled.
    pub fn check_canceled(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            return Err(ViewError::Cancelled);
        }
        Ok(())
    }

    /// The registered provider for `file`, creating and registering one with
    /// events enabled when none is alive.
    pub fn view_provider(self: &Arc<Self>, file: Arc<dyn VirtualFile>) -> Arc<ViewProvider> {
        self.file_manager.get_or_insert_with(file.as_ref(), || {
            ViewProvider::new(Arc::clone(self), Arc::clone(&file))
        })
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("limits", &self.limits)
            .field("providers", &self.file_manager.len())
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Project`]. Every service has a default.
///
/// Size limits default to [`FileSizeLimits::from_env`]; roots default to an
/// empty [`ProjectRoots`]; documents to an [`InMemoryDocumentManager`].
#[derive(Default)]
pub struct ProjectBuilder {
    name: Option<SmolStr>,
    limits: Option<FileSizeLimits>,
    documents: Option<Arc<dyn DocumentManager>>,
    directories: Option<Arc<dyn DirectoryIndex>>,
    index: Option<Arc<dyn FileIndexFacade>>,
    file_types: Option<FileTypeRegistry>,
    parser_definitions: ParserDefinitions,
    substitutors: LanguageSubstitutors,
    cancellation: Option<CancellationToken>,
}

impl ProjectBuilder {
    pub fn name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn limits(mut self, limits: FileSizeLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn document_manager(mut self, documents: Arc<dyn DocumentManager>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Use `roots` for both directory and library lookups.
    pub fn roots(mut self, roots: ProjectRoots) -> Self {
        let roots = Arc::new(roots);
        let directories: Arc<dyn DirectoryIndex> = roots.clone();
        let index: Arc<dyn FileIndexFacade> = roots;
        self.directories = Some(directories);
        self.index = Some(index);
        self
    }

    pub fn directory_index(mut self, directories: Arc<dyn DirectoryIndex>) -> Self {
        self.directories = Some(directories);
        self
    }

    pub fn index_facade(mut self, index: Arc<dyn FileIndexFacade>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn file_types(mut self, file_types: FileTypeRegistry) -> Self {
        self.file_types = Some(file_types);
        self
    }

    pub fn parser_definitions(mut self, parser_definitions: ParserDefinitions) -> Self {
        self.parser_definitions = parser_definitions;
        self
    }

    pub fn substitutors(mut self, substitutors: LanguageSubstitutors) -> Self {
        self.substitutors = substitutors;
        self
    }

    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn build(self) -> Arc<Project> {
        let limits = self.limits.unwrap_or_else(FileSizeLimits::from_env);
        let roots = Arc::new(ProjectRoots::default());
        let directories: Arc<dyn DirectoryIndex> = match self.directories {
            Some(directories) => directories,
            None => roots.clone(),
        };
        let index: Arc<dyn FileIndexFacade> = match self.index {
            Some(index) => index,
            None => roots,
        };
        let documents: Arc<dyn DocumentManager> = match self.documents {
            Some(documents) => documents,
            None => Arc::new(InMemoryDocumentManager::new(limits)),
        };
        let project = Project {
            name: self.name.unwrap_or_else(|| SmolStr::new("default")),
            limits,
            documents,
            file_manager: FileManager::new(),
            directories,
            index,
            file_types: self.file_types.unwrap_or_default(),
            parser_definitions: self.parser_definitions,
            substitutors: self.substitutors,
            read_access: ReadAccess::new(),
            cancellation: self.cancellation.unwrap_or_default(),
        };
        tracing::debug!(project = %project.name, ?limits, "project created");
        Arc::new(project)
    }
}
