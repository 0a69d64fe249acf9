//! # syster-view
//!
//! Single-root file view provider: binds a virtual file to a lazily built
//! parsed file and keeps the file, its editor document and the parse tree
//! consistent under concurrent access.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! provider  → ViewProvider, content sources, language resolution, file factory
//!   ↓
//! project   → Documents, file manager, project roots, read access, cancellation
//!   ↓
//! psi       → ParsedFile variants (binary, plain text, large, language-parsed)
//!   ↓
//! syntax    → Tree roots, position lookup
//!   ↓
//! parser    → Logos lexer, token and plain-text tree builders
//!   ↓
//! lang      → Languages, file types, substitutors, parser definitions
//!   ↓
//! vfs       → Virtual files, size classification
//!   ↓
//! base      → Primitives (FileId, stamps, user data, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use syster_view::lang::{FileType, Language};
//! use syster_view::project::Project;
//! use syster_view::vfs::LightVirtualFile;
//!
//! let project = Project::builder().build();
//! let file = Arc::new(LightVirtualFile::new("notes.txt", FileType::plain_text(), "hello"));
//! let provider = project.view_provider(file);
//!
//! assert_eq!(provider.base_language(), &Language::plain_text());
//! assert_eq!(&*provider.contents(), "hello");
//! assert!(provider.parsed(&Language::plain_text()).unwrap().is_some());
//! ```

// ============================================================================
// MODULES (dependency order: base → vfs → lang → parser → syntax → psi → project → provider)
// ============================================================================

/// Foundation types: FileId, stamps, user data, TextRange
pub mod base;

/// Virtual files and size classification
pub mod vfs;

/// Languages, file types and their registries
pub mod lang;

/// Parser: Logos lexer, token tree builder
pub mod parser;

/// Syntax: tree roots and position lookup
pub mod syntax;

/// Parsed files
pub mod psi;

/// Project services
pub mod project;

/// The view provider
pub mod provider;

mod error;

// Re-export the main entry points
pub use error::{Result, ViewError};
pub use provider::{ContentKind, ViewProvider};
pub use psi::{ParsedFile, ParsedFileKind};

// Re-export foundation types
pub use base::{FileId, TextRange, TextSize};
