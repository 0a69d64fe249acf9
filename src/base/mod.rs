//! Foundation types for the view provider.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Process-unique virtual file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Key`], [`UserDataHolder`] - Typed per-file user data slots
//! - [`stamp`] - The monotonic modification counter
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
pub mod stamp;
mod user_data;

pub use file_id::FileId;
pub use user_data::{Key, UserDataHolder};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
