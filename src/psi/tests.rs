#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::lang::{FileType, FileTypeRegistry, Language, ParserDefinitions};
use crate::parser::{SyntaxKind, TokenParserDefinition};
use crate::project::Project;
use crate::provider::ViewProvider;
use crate::vfs::{FileSizeLimits, LightVirtualFile};

fn foo() -> Language {
    Language::new("Foo")
}

fn project() -> Arc<Project> {
    let mut file_types = FileTypeRegistry::default();
    file_types.register(FileType::language("FOO", "foo", foo()));
    let mut definitions = ParserDefinitions::new();
    definitions.register(foo(), TokenParserDefinition::with_references([SyntaxKind::WORD]));
    Project::builder()
        .limits(FileSizeLimits::new(1 << 20, 1 << 20))
        .file_types(file_types)
        .parser_definitions(definitions)
        .build()
}

fn provider(name: &str, file_type: FileType, text: &str) -> Arc<ViewProvider> {
    let file = Arc::new(LightVirtualFile::new(name, file_type, text));
    ViewProvider::new(project(), file)
}

#[rstest]
#[case(ParsedFileKind::Binary, false)]
#[case(ParsedFileKind::Plaintext, true)]
#[case(ParsedFileKind::LargePlaintext, false)]
#[case(ParsedFileKind::LanguageParsed, true)]
fn test_kind_has_tree(#[case] kind: ParsedFileKind, #[case] has_tree: bool) {
    assert_eq!(kind.has_tree(), has_tree);
}

#[test]
fn test_plain_text_tree_is_built_lazily() {
    let provider = provider("a.txt", FileType::plain_text(), "abc");
    let parsed = ParsedFile::plain_text(&provider);

    assert!(!parsed.is_contents_loaded());
    assert_eq!(parsed.text_len(), 3);

    let tree = parsed.calc_tree_element().unwrap();
    assert_eq!(tree.element_type(), SyntaxKind::PLAIN_TEXT_FILE);
    assert!(parsed.is_contents_loaded());
    assert!(Arc::ptr_eq(&tree, &parsed.calc_tree_element().unwrap()));
    assert_eq!(parsed.text().as_deref(), Some("abc"));
}

#[test]
fn test_language_parsed_file_uses_parser_definition() {
    let file_type = FileType::language("FOO", "foo", foo());
    let provider = provider("x.foo", file_type, "a b\nc");
    let parsed = ParsedFile::language_parsed(&provider);

    let tree = parsed.calc_tree_element().unwrap();
    assert_eq!(tree.element_type(), SyntaxKind::TOKEN_FILE);
    assert_eq!(parsed.language(), &foo());
    assert!(parsed.is_reference_kind(SyntaxKind::WORD));
    assert!(!parsed.is_reference_kind(SyntaxKind::PUNCT));
}

#[test]
fn test_files_without_tree() {
    let provider = provider("a.bin", FileType::binary("BIN", "bin"), "0123456789");

    let binary = ParsedFile::binary(&provider);
    assert!(binary.calc_tree_element().is_none());
    assert!(binary.text().is_none());
    assert_eq!(binary.text_len(), 0);

    let large = ParsedFile::large_plain_text(&provider);
    assert!(large.calc_tree_element().is_none());
    assert_eq!(large.text_len(), 10);
}

#[test]
fn test_mark_invalidated_counts_calls() {
    let provider = provider("a.txt", FileType::plain_text(), "abc");
    let parsed = ParsedFile::plain_text(&provider);
    assert!(parsed.is_valid());

    assert!(parsed.mark_invalidated());
    assert!(!parsed.mark_invalidated());

    assert!(!parsed.is_valid());
    assert_eq!(parsed.invalidation_count(), 2);
}

#[test]
fn test_parsed_file_outlives_provider() {
    let provider = provider("a.txt", FileType::plain_text(), "abc");
    let parsed = ParsedFile::plain_text(&provider);
    assert!(parsed.provider().is_some());

    drop(provider);

    assert!(parsed.provider().is_none());
    assert!(parsed.calc_tree_element().is_none());
    assert_eq!(parsed.text_len(), 0);
}

#[test]
fn test_invalidation_counter_outlives_file() {
    let provider = provider("a.txt", FileType::plain_text(), "abc");
    let parsed = ParsedFile::plain_text(&provider);
    let counter = parsed.invalidation_counter();

    parsed.mark_invalidated();
    drop(parsed);

    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 1);
}
