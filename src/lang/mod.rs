//! Languages, file types and the registries that extend them.
//!
//! - [`Language`] - language identity with dialect chains
//! - [`FileType`], [`FileTypeRegistry`] - file name → type, ignored files
//! - [`LanguageSubstitutors`] - per-project language rewriting
//! - [`ParserDefinitions`] - per-language parsed-file construction

mod file_type;
mod language;
mod parser_definition;
mod substitutor;

pub use file_type::{DEFAULT_IGNORED_FILES, FileType, FileTypeKind, FileTypeRegistry};
pub use language::Language;
pub use parser_definition::{ParserDefinition, ParserDefinitions};
pub use substitutor::{LanguageSubstitutor, LanguageSubstitutors};
