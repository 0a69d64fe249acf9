//! Syntax kinds for the built-in token trees
//!
//! Two tree shapes are built from these kinds:
//! - token trees: `TOKEN_FILE` → `LINE`* with `NEWLINE` tokens between lines
//! - plain-text trees: `PLAIN_TEXT_FILE` holding at most one `PLAIN_TEXT` token

/// All syntax kinds (tokens and nodes) of the built-in trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TOKENS
    // =========================================================================
    WHITESPACE = 0, // spaces and tabs
    NEWLINE,        // \n, \r\n or \r
    WORD,           // letters, digits and underscores, not starting with a digit
    NUMBER,         // 42, 3.14
    STRING,         // "hello"
    PUNCT,          // any other single character
    ERROR,
    PLAIN_TEXT, // the whole text of a plain-text file

    // =========================================================================
    // NODES
    // =========================================================================
    PLAIN_TEXT_FILE,
    TOKEN_FILE,
    LINE,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or line break)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Check if this kind is a leaf
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::PLAIN_TEXT as u16)
    }

    /// Check if this kind roots a whole file
    pub fn is_file(self) -> bool {
        matches!(self, Self::PLAIN_TEXT_FILE | Self::TOKEN_FILE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        if raw.0 >= SyntaxKind::__LAST as u16 {
            return SyntaxKind::ERROR;
        }
        // Safety: the enum is repr(u16), contiguous from 0, and the bound is checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenLanguage {}

impl rowan::Language for TokenLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TokenLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TokenLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TokenLanguage>;
