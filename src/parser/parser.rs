//! Tree builders for the built-in languages
//!
//! Builds rowan GreenNode trees. Both trees are lossless: the text of the
//! root always equals the input.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder};

/// Parse text into a `TOKEN_FILE` tree with one `LINE` node per non-empty line
pub fn parse_tokens(input: &str) -> GreenNode {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_file();
    parser.finish()
}

/// Build a `PLAIN_TEXT_FILE` tree holding the whole text as a single leaf
pub fn plain_text(input: &str) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::PLAIN_TEXT_FILE.into());
    if !input.is_empty() {
        builder.token(SyntaxKind::PLAIN_TEXT.into(), input);
    }
    builder.finish_node();
    builder.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
        }
    }

    fn finish(self) -> GreenNode {
        self.builder.finish()
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_file(&mut self) {
        self.builder.start_node(SyntaxKind::TOKEN_FILE.into());
        while !self.at_eof() {
            if self.at(SyntaxKind::NEWLINE) {
                self.bump();
            } else {
                self.parse_line();
            }
        }
        self.builder.finish_node();
    }

    fn parse_line(&mut self) {
        self.builder.start_node(SyntaxKind::LINE.into());
        while !self.at_eof() && !self.at(SyntaxKind::NEWLINE) {
            self.bump();
        }
        self.builder.finish_node();
    }
}
