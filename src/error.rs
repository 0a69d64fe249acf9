//! Error types for view provider operations.

use smol_str::SmolStr;
use thiserror::Error;

use crate::lang::Language;

/// Errors that can occur while building or reading parsed files.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Cooperative cancellation. Always propagated, never swallowed.
    #[error("operation cancelled")]
    Cancelled,

    /// IO error while reading a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A parser definition failed to build a parsed file.
    #[error("cannot create {language} file for {file}: {message}")]
    Construction {
        file: SmolStr,
        language: Language,
        message: String,
    },

    /// A parser definition panicked while building a parsed file.
    #[error("parser for {language} panicked on {file}: {message}")]
    ParserPanicked {
        file: SmolStr,
        language: Language,
        message: String,
    },
}

impl ViewError {
    /// Create a construction error.
    pub fn construction(
        file: impl Into<SmolStr>,
        language: Language,
        message: impl Into<String>,
    ) -> Self {
        Self::Construction {
            file: file.into(),
            language,
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
