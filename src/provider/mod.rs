//! The single-root file view provider.
//!
//! ```text
//! ViewProvider ──resolves once──▶ base Language        (resolver)
//!      │
//!      ├── parsed: CAS slot ──built by──▶ ParsedFile    (factory)
//!      │
//!      └── content: FileBacked | TreeBacked            (content)
//! ```
//!
//! The provider owns the binding from one [`VirtualFile`](crate::vfs::VirtualFile)
//! to at most one [`ParsedFile`](crate::psi::ParsedFile) in its base language,
//! and mediates text access between the file, its committed document and
//! the parsed tree.

mod content;
pub mod factory;
pub mod resolver;
mod view_provider;

pub use content::ContentKind;
pub use view_provider::ViewProvider;
