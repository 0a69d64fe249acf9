//! Language resolution and parsed-file variants for files on disk.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use syster_view::lang::{Language, LanguageSubstitutors};
use syster_view::project::ProjectRoots;
use syster_view::vfs::{FileSizeLimits, VirtualFile};
use syster_view::{ContentKind, ParsedFileKind, TextSize};

use crate::helpers::files::SpecialFile;
use crate::helpers::projects::{MIB, Workspace, definitions, foo};

#[test]
fn test_ordinary_text_file() {
    let workspace = Workspace::new();
    let text = "x".repeat(99) + "\n";
    let path = workspace.write("a.txt", &text);
    let project = workspace.builder().build();
    let file = workspace.open(&project, &path);

    let provider = project.view_provider(file.clone());

    assert_eq!(file.length(), 100);
    assert!(provider.is_physical());
    assert_eq!(provider.base_language(), &Language::plain_text());
    let parsed = provider.parsed(&Language::plain_text()).unwrap().unwrap();
    assert_eq!(parsed.kind(), ParsedFileKind::Plaintext);
    assert_eq!(&*provider.contents(), text);
    assert_eq!(provider.modification_stamp(), file.modification_stamp());
    assert_eq!(provider.content_kind(), ContentKind::FileBacked);
    assert_eq!(parsed.text_len(), 100);
}

#[test]
fn test_substituted_language() {
    let workspace = Workspace::new();
    let path = workspace.write("x.foo", "part wheel");
    let bar = Language::new("Bar");
    let mut substitutors = LanguageSubstitutors::new();
    let substituted = bar.clone();
    substitutors.register(foo(), move |_: &dyn VirtualFile, _: &syster_view::project::Project| {
        Some(substituted.clone())
    });
    let project = workspace
        .builder()
        .substitutors(substitutors)
        .parser_definitions(definitions(&[bar.clone()]))
        .build();
    let file = workspace.open(&project, &path);

    let provider = project.view_provider(file);

    assert_eq!(provider.base_language(), &bar);
    assert!(provider.parsed(&foo()).unwrap().is_none());
    let parsed = provider.parsed(&bar).unwrap().unwrap();
    assert_eq!(parsed.kind(), ParsedFileKind::LanguageParsed);
    assert_eq!(parsed.language(), &bar);

    let reference = provider.find_reference_at(TextSize::new(6)).unwrap().unwrap();
    assert_eq!(reference.canonical_text(), "wheel");
}

#[test]
fn test_oversized_file_is_never_loaded() {
    let workspace = Workspace::new();
    let path = workspace.sparse("big.foo", 20 * MIB);
    let project = workspace
        .builder()
        .limits(FileSizeLimits::new(2 * MIB, 10 * MIB))
        .build();
    let file = workspace.open(&project, &path);

    let provider = project.view_provider(file);

    assert_eq!(provider.base_language(), &Language::plain_text());
    let parsed = provider.parsed(&Language::plain_text()).unwrap().unwrap();
    assert_eq!(parsed.kind(), ParsedFileKind::LargePlaintext);
    assert!(parsed.calc_tree_element().is_none());
    assert!(!parsed.is_contents_loaded());
    assert_eq!(parsed.text_len(), 20 * MIB);
    assert!(provider.cached_document().is_none());
    assert!(provider.known_tree_roots().is_empty());
}

#[test]
fn test_file_between_thresholds_is_plain_text() {
    let workspace = Workspace::new();
    let path = workspace.sparse("mid.foo", 4 * MIB);
    let project = workspace
        .builder()
        .limits(FileSizeLimits::new(2 * MIB, 10 * MIB))
        .build();
    let file = workspace.open(&project, &path);

    let provider = project.view_provider(file);

    let parsed = provider.parsed(&Language::plain_text()).unwrap().unwrap();
    assert_eq!(parsed.kind(), ParsedFileKind::Plaintext);
}

#[test]
fn test_special_file_is_binary() {
    let project = Workspace::new().builder().build();
    let file = SpecialFile::new("tty0", syster_view::lang::FileType::text("DEV", "dev"));

    let provider = project.view_provider(file);

    assert_eq!(provider.base_language(), &Language::plain_text());
    let parsed = provider.parsed(&Language::plain_text()).unwrap().unwrap();
    assert_eq!(parsed.kind(), ParsedFileKind::Binary);
    assert!(parsed.calc_tree_element().is_none());
    assert!(provider.document().is_none());
}

#[cfg(unix)]
#[test]
fn test_fifo_on_disk_is_binary() {
    let workspace = Workspace::new();
    let path = workspace.root().join("pipe.txt");
    let created = std::process::Command::new("mkfifo")
        .arg(&path)
        .status()
        .is_ok_and(|status| status.success());
    if !created {
        return;
    }
    let project = workspace.builder().build();
    let file = workspace.open(&project, &path);

    let provider = project.view_provider(file.clone());

    assert!(file.is_special());
    let parsed = provider.parsed(&Language::plain_text()).unwrap().unwrap();
    assert_eq!(parsed.kind(), ParsedFileKind::Binary);
}

#[test]
fn test_excluded_file_has_no_parsed_file() {
    let workspace = Workspace::new();
    std::fs::create_dir(workspace.root().join("target")).unwrap();
    let path = workspace.write("target/a.txt", "abc");
    let project = workspace
        .builder()
        .roots(
            ProjectRoots::new()
                .with_content_root(workspace.root())
                .with_excluded(workspace.root().join("target")),
        )
        .build();
    let file = workspace.open(&project, &path);

    let provider = project.view_provider(file);

    assert!(provider.parsed(&Language::plain_text()).unwrap().is_none());
    assert!(provider.all_files().unwrap().is_empty());
}

#[test]
fn test_providers_are_shared_per_file() {
    let workspace = Workspace::new();
    let path = workspace.write("x.foo", "abc");
    let project = workspace.builder().build();
    let file = workspace.open(&project, &path);

    let first = project.view_provider(file.clone());
    let second = project.view_provider(file);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(project.file_manager().len(), 1);
}
