//! Trees held by parsed files and lookups over them.
//!
//! - [`FileElement`] - the root of a parsed file's tree
//! - [`element_at`], [`reference_at`] - position lookup

mod file;
mod lookup;

pub use file::FileElement;
pub use lookup::{Reference, TreeElement, element_at, reference_at};
