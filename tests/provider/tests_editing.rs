//! The edit cycle: pin the tree, edit, commit, return to the file.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use syster_view::lang::Language;
use syster_view::parser::plain_text;
use syster_view::project::InMemoryDocumentManager;
use syster_view::vfs::{FileSizeLimits, VirtualFile};
use syster_view::{ContentKind, TextSize};

use crate::helpers::projects::{MIB, Workspace, foo};

#[test]
fn test_edit_cycle() {
    let workspace = Workspace::new();
    let path = workspace.write("a.txt", "abc");
    let documents = Arc::new(InMemoryDocumentManager::new(FileSizeLimits::new(MIB, MIB)));
    let project = workspace.builder().document_manager(documents.clone()).build();
    let file = workspace.open(&project, &path);
    let provider = project.view_provider(file.clone());

    let parsed = provider.parsed(&Language::plain_text()).unwrap().unwrap();
    let tree = parsed.calc_tree_element().unwrap();
    assert_eq!(tree.text(), "abc");

    provider.before_document_changed(None).unwrap();
    assert_eq!(provider.content_kind(), ContentKind::TreeBacked);
    tree.replace_green(plain_text("abcd"));
    assert_eq!(&*provider.contents(), "abcd");

    let document = provider.document().unwrap();
    document.set_text("abcd");
    std::fs::write(&path, "abcd").unwrap();
    file.refresh();
    documents.commit_document(&document);
    provider.contents_synchronized();

    assert_eq!(file.length(), 4);
    assert_eq!(provider.inconsistent_tree_count(), 0);
    assert_eq!(provider.content_kind(), ContentKind::FileBacked);
    assert_eq!(&*provider.contents(), "abcd");
    assert_eq!(provider.modification_stamp(), document.modification_stamp());
}

#[test]
fn test_stamp_is_frozen_while_editing() {
    let workspace = Workspace::new();
    let path = workspace.write("x.foo", "one two");
    let documents = Arc::new(InMemoryDocumentManager::new(FileSizeLimits::new(MIB, MIB)));
    let project = workspace.builder().document_manager(documents.clone()).build();
    let provider = project.view_provider(workspace.open(&project, &path));
    let stamp = provider.modification_stamp();

    provider.before_document_changed(None).unwrap();
    let document = provider.document().unwrap();
    document.set_text("one two three");

    assert_eq!(provider.modification_stamp(), stamp);
    assert_eq!(&*provider.contents(), "one two");

    documents.commit_document(&document);
    provider.contents_synchronized();

    assert!(provider.modification_stamp() > stamp);
    // The tree still has the old text until it is reparsed.
    assert_eq!(provider.inconsistent_tree_count(), 1);
}

#[test]
fn test_lookup_follows_replaced_tree() {
    let workspace = Workspace::new();
    let path = workspace.write("x.foo", "alpha");
    let project = workspace.builder().build();
    let provider = project.view_provider(workspace.open(&project, &path));
    let parsed = provider.parsed(&foo()).unwrap().unwrap();
    let tree = parsed.calc_tree_element().unwrap();

    tree.replace_green(syster_view::parser::parse_tokens("alpha beta"));
    provider.root_changed(&parsed);

    let element = provider.find_element_at(TextSize::new(7)).unwrap().unwrap();
    assert_eq!(element.text, "beta");
    assert_eq!(&*provider.contents(), "alpha beta");
}

#[test]
fn test_clone_is_detached_from_edits() {
    let workspace = Workspace::new();
    let path = workspace.write("x.foo", "abc");
    let project = workspace.builder().build();
    let provider = project.view_provider(workspace.open(&project, &path));

    let copy = provider.clone_view();
    let document = provider.document().unwrap();
    document.set_text("changed");

    assert_eq!(&*copy.contents(), "abc");
    assert_eq!(copy.base_language(), &foo());
    let parsed = copy.parsed(&foo()).unwrap().unwrap();
    assert_eq!(parsed.text().unwrap(), "abc");
    assert!(copy.virtual_file().is_light());
}
