//! Parsed files: the objects a view provider binds to its backing file.
//!
//! A [`ParsedFile`] is one of four [`ParsedFileKind`]s. Only plain-text and
//! language-parsed files have a tree; it is built lazily from the provider's
//! current content on first access.

mod parsed_file;

pub use parsed_file::{ParsedFile, ParsedFileKind};

#[cfg(test)]
mod tests;
