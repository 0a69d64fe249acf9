//! Projects over temporary content roots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use syster_view::lang::{FileType, FileTypeRegistry, Language, ParserDefinitions};
use syster_view::parser::{SyntaxKind, TokenParserDefinition};
use syster_view::project::{Project, ProjectBuilder, ProjectRoots};
use syster_view::vfs::{FileSizeLimits, LocalFile};
use tempfile::TempDir;

pub const MIB: u64 = 1024 * 1024;

pub fn foo() -> Language {
    Language::new("Foo")
}

pub fn foo_type() -> FileType {
    FileType::language("FOO", "foo", foo())
}

/// Default file types plus `*.foo`.
pub fn file_types() -> FileTypeRegistry {
    let mut registry = FileTypeRegistry::default();
    registry.register(foo_type());
    registry
}

/// Token parser definitions for `languages`, with words as references.
pub fn definitions(languages: &[Language]) -> ParserDefinitions {
    let mut definitions = ParserDefinitions::new();
    for language in languages {
        definitions.register(
            language.clone(),
            TokenParserDefinition::with_references([SyntaxKind::WORD]),
        );
    }
    definitions
}

/// A temporary directory registered as the project's only content root.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// A builder with this workspace as content root and 1 MiB limits.
    pub fn builder(&self) -> ProjectBuilder {
        Project::builder()
            .name("workspace")
            .limits(FileSizeLimits::new(MIB, MIB))
            .roots(ProjectRoots::new().with_content_root(self.root()))
            .file_types(file_types())
            .parser_definitions(definitions(&[foo()]))
    }

    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, text).expect("write file");
        path
    }

    /// Create `name` with `length` zero bytes without allocating them.
    pub fn sparse(&self, name: &str, length: u64) -> PathBuf {
        let path = self.root().join(name);
        let file = std::fs::File::create(&path).expect("create file");
        file.set_len(length).expect("extend file");
        path
    }

    pub fn open(&self, project: &Project, path: &Path) -> Arc<LocalFile> {
        LocalFile::open(path, project.file_types()).expect("open file")
    }
}
