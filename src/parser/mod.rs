//! Rowan-based trees for the built-in languages
//!
//! This module provides lossless trees using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! FileElement → root held by a parsed file
//! ```
//!
//! [`TokenParserDefinition`] plugs the token parser into a
//! [`ParserDefinitions`](crate::lang::ParserDefinitions) registry.

#[allow(clippy::module_inception)]
mod parser;

mod definition;
mod lexer;
mod syntax_kind;

pub use definition::TokenParserDefinition;
pub use lexer::{Lexer, LogosToken, Token, tokenize};
pub use parser::{parse_tokens, plain_text};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenLanguage};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
