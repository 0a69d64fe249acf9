//! Logos-based lexer for the built-in token language
//!
//! Splits text into words, numbers, strings, punctuation and trivia. Every
//! byte of the input ends up in exactly one token.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let start = self.offset;
        self.offset += text.len();

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        let (kind, offset) = locate(kind, start);

        Some(Token { kind, text, offset })
    }
}

/// Tokens that start beyond the range of `TextSize` become `ERROR` tokens
/// pinned at the last representable offset.
fn locate(kind: SyntaxKind, start: usize) -> (SyntaxKind, TextSize) {
    match TextSize::try_from(start) {
        Ok(offset) => (kind, offset),
        Err(_) => (SyntaxKind::ERROR, TextSize::from(u32::MAX)),
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    String,

    #[regex(r#"[^\s\p{L}\p{N}_"]"#)]
    Punct,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            Word => SyntaxKind::WORD,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,
            Punct => SyntaxKind::PUNCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_words_and_punct() {
        let tokens = tokenize("let x = 42;");
        assert_eq!(tokens.len(), 8); // let, ws, x, ws, =, ws, 42, ;
        assert_eq!(tokens[0].kind, SyntaxKind::WORD);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[4].kind, SyntaxKind::PUNCT);
        assert_eq!(tokens[6].kind, SyntaxKind::NUMBER);
        assert_eq!(tokens[6].text, "42");
        assert_eq!(tokens[7].kind, SyntaxKind::PUNCT);
    }

    #[test]
    fn test_lex_offsets_cover_input() {
        let input = "héllo, wörld\r\n3.14";
        let tokens = tokenize(input);
        let mut expected = 0u32;
        for token in &tokens {
            assert_eq!(token.offset, TextSize::new(expected));
            expected += token.text.len() as u32;
        }
        assert_eq!(expected as usize, input.len());
    }

    #[test]
    fn test_offsets_within_text_size_keep_kind() {
        assert_eq!(
            locate(SyntaxKind::WORD, 7),
            (SyntaxKind::WORD, TextSize::new(7))
        );
        assert_eq!(
            locate(SyntaxKind::WORD, u32::MAX as usize),
            (SyntaxKind::WORD, TextSize::from(u32::MAX))
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_offsets_beyond_u32_are_errors() {
        let start = u32::MAX as usize + 1;
        assert_eq!(
            locate(SyntaxKind::WORD, start),
            (SyntaxKind::ERROR, TextSize::from(u32::MAX))
        );
    }

    #[test]
    fn test_lex_newlines() {
        assert_eq!(
            kinds("a\nb\r\nc\rd"),
            vec![
                SyntaxKind::WORD,
                SyntaxKind::NEWLINE,
                SyntaxKind::WORD,
                SyntaxKind::NEWLINE,
                SyntaxKind::WORD,
                SyntaxKind::NEWLINE,
                SyntaxKind::WORD,
            ]
        );
    }

    #[test]
    fn test_lex_string() {
        let tokens = tokenize(r#"say "hi \"there\"""#);
        assert_eq!(tokens[2].kind, SyntaxKind::STRING);
        assert_eq!(tokens[2].text, r#""hi \"there\"""#);
    }
}
