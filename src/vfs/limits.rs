//! Size classification of files.
//!
//! Two thresholds govern how much support a file gets:
//!
//! - files longer than [`FileSizeLimits::max_intellisense`] are not parsed by
//!   their language and fall back to plain text
//! - files longer than [`FileSizeLimits::max_content_load`] are not loaded
//!   into memory at all
//!
//! The [`NO_SIZE_LIMIT`] user-data flag lifts the first threshold for one
//! file. It never lifts the second.

use std::env;

use crate::base::Key;

use super::VirtualFile;

/// Per-file override of the intellisense threshold.
pub static NO_SIZE_LIMIT: Key<bool> = Key::new("no.size.limit");

pub const DEFAULT_MAX_INTELLISENSE_FILESIZE: u64 = 2_500_000;
pub const DEFAULT_MAX_CONTENT_LOAD_FILESIZE: u64 = 20 * 1024 * 1024;

pub const MAX_INTELLISENSE_FILESIZE_VAR: &str = "SYSTER_MAX_INTELLISENSE_FILESIZE";
pub const MAX_CONTENT_LOAD_FILESIZE_VAR: &str = "SYSTER_MAX_CONTENT_LOAD_FILESIZE";

/// Byte thresholds for language support and content loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizeLimits {
    pub max_intellisense: u64,
    pub max_content_load: u64,
}

impl Default for FileSizeLimits {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_INTELLISENSE_FILESIZE,
            DEFAULT_MAX_CONTENT_LOAD_FILESIZE,
        )
    }
}

impl FileSizeLimits {
    pub const fn new(max_intellisense: u64, max_content_load: u64) -> Self {
        Self {
            max_intellisense,
            max_content_load,
        }
    }

    /// Defaults, overridden by the `SYSTER_MAX_*_FILESIZE` environment
    /// variables (in kilobytes).
    pub fn from_env() -> Self {
        Self::from_env_with(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let kilobytes = |name: &str| -> Option<u64> {
            let raw = lookup(name)?;
            match raw.trim().parse::<u64>() {
                Ok(value) => Some(value.saturating_mul(1024)),
                Err(err) => {
                    tracing::warn!(variable = name, value = %raw, error = %err, "ignoring invalid file size limit");
                    None
                }
            }
        };
        let defaults = Self::default();
        Self {
            max_intellisense: kilobytes(MAX_INTELLISENSE_FILESIZE_VAR)
                .unwrap_or(defaults.max_intellisense),
            max_content_load: kilobytes(MAX_CONTENT_LOAD_FILESIZE_VAR)
                .unwrap_or(defaults.max_content_load),
        }
    }

    /// True when `file` should not be parsed by its language.
    pub fn is_too_large_for_intelligence(&self, file: &dyn VirtualFile) -> bool {
        if !check_file_size_limit(file) {
            return false;
        }
        file_size_is_greater_than(file, self.max_intellisense)
    }

    /// True when `file` should not be loaded into memory.
    pub fn is_too_large_for_content_loading(&self, file: &dyn VirtualFile) -> bool {
        file_size_is_greater_than(file, self.max_content_load)
    }

    /// Same as [`is_too_large_for_intelligence`](Self::is_too_large_for_intelligence)
    /// with a length the caller already knows.
    pub fn is_too_large_for_intelligence_with_size(
        &self,
        file: &dyn VirtualFile,
        content_size: u64,
    ) -> bool {
        check_file_size_limit(file) && content_size > self.max_intellisense
    }

    pub fn is_too_large_for_content_loading_with_size(&self, content_size: u64) -> bool {
        content_size > self.max_content_load
    }
}

/// Lift the intellisense threshold for `file`.
pub fn do_not_check_file_size_limit(file: &dyn VirtualFile) {
    file.user_data().put(&NO_SIZE_LIMIT, Some(true));
}

fn check_file_size_limit(file: &dyn VirtualFile) -> bool {
    !file.user_data().is_set(&NO_SIZE_LIMIT)
}

fn file_size_is_greater_than(file: &dyn VirtualFile, max_bytes: u64) -> bool {
    if let Some(text) = file.light_text() {
        // Counted in UTF-16 units. Only measure the encoded length when the
        // unit count is inconclusive.
        let units = text.chars().map(char::len_utf16).sum::<usize>() as u64;
        if units < max_bytes / 2 {
            return false;
        }
        if units > max_bytes {
            return true;
        }
    }
    file.length() > max_bytes
}
