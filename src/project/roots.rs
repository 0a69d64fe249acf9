//! Project roots and the lookups the view provider makes against them.

use std::path::{Path, PathBuf};

use crate::vfs::VirtualFile;

/// A directory that belongs to the project's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirectory {
    path: PathBuf,
}

impl ProjectDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Finds project directories.
pub trait DirectoryIndex: Send + Sync {
    fn find_directory(&self, directory: &dyn VirtualFile) -> Option<ProjectDirectory>;
}

/// Answers questions about library membership.
pub trait FileIndexFacade: Send + Sync {
    fn is_in_library_source(&self, file: &dyn VirtualFile) -> bool;

    fn is_in_library_classes(&self, file: &dyn VirtualFile) -> bool;
}

/// Content, excluded and library roots of a project, matched by path prefix.
#[derive(Debug, Clone, Default)]
pub struct ProjectRoots {
    content: Vec<PathBuf>,
    excluded: Vec<PathBuf>,
    library_sources: Vec<PathBuf>,
    library_classes: Vec<PathBuf>,
}

impl ProjectRoots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.content.push(path.into());
        self
    }

    pub fn with_excluded(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded.push(path.into());
        self
    }

    pub fn with_library_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_sources.push(path.into());
        self
    }

    pub fn with_library_classes(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_classes.push(path.into());
        self
    }

    pub fn is_in_content(&self, path: &Path) -> bool {
        under_any(path, &self.content) && !under_any(path, &self.excluded)
    }
}

fn under_any(path: &Path, roots: &[PathBuf]) -> bool {
    roots.iter().any(|root| path.starts_with(root))
}

impl DirectoryIndex for ProjectRoots {
    fn find_directory(&self, directory: &dyn VirtualFile) -> Option<ProjectDirectory> {
        if !directory.is_directory() || !self.is_in_content(directory.path()) {
            return None;
        }
        Some(ProjectDirectory::new(directory.path()))
    }
}

impl FileIndexFacade for ProjectRoots {
    fn is_in_library_source(&self, file: &dyn VirtualFile) -> bool {
        under_any(file.path(), &self.library_sources)
    }

    fn is_in_library_classes(&self, file: &dyn VirtualFile) -> bool {
        under_any(file.path(), &self.library_classes)
    }
}
