//! Virtual files as seen by the view provider.
//!
//! The provider only consumes a narrow set of file attributes, captured by the
//! [`VirtualFile`] trait. Two concrete files are provided:
//!
//! - [`LocalFile`] - a file on the local, persistent file system
//! - [`LightVirtualFile`] - a synthetic file holding its text in memory
//!
//! [`FileSizeLimits`] classifies files as too large for language support or
//! for content loading.

mod charset;
mod light;
pub mod limits;
mod local;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub use charset::Charset;
pub use light::LightVirtualFile;
pub use limits::{FileSizeLimits, NO_SIZE_LIMIT, do_not_check_file_size_limit};
pub use local::LocalFile;

use crate::base::{FileId, Key, UserDataHolder};
use crate::error::Result;
use crate::lang::{FileType, Language};

/// Set on copies that must not be recorded by undo.
pub static DONT_RECORD_UNDO: Key<bool> = Key::new("dont.record.undo");

/// The file system a virtual file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSystemKind {
    /// The local disk.
    Local,
    /// Entries inside an archive on disk.
    Archive,
    /// In-memory files with no persistent backing.
    NonPhysical,
}

impl FileSystemKind {
    pub fn is_physical(self) -> bool {
        !matches!(self, Self::NonPhysical)
    }
}

/// A file of the virtual file system.
pub trait VirtualFile: Send + Sync + fmt::Debug {
    fn id(&self) -> FileId;

    fn name(&self) -> &str;

    fn path(&self) -> &Path;

    fn file_type(&self) -> FileType;

    /// Length of the content in bytes.
    fn length(&self) -> u64;

    fn charset(&self) -> Charset;

    fn parent(&self) -> Option<Arc<dyn VirtualFile>>;

    fn modification_stamp(&self) -> u64;

    fn user_data(&self) -> &UserDataHolder;

    fn is_directory(&self) -> bool {
        false
    }

    /// Devices, fifos and sockets.
    fn is_special(&self) -> bool {
        false
    }

    fn file_system(&self) -> FileSystemKind;

    fn is_in_local_file_system(&self) -> bool {
        self.file_system() == FileSystemKind::Local
    }

    /// Read and decode the whole content. May block on the file system.
    fn load_text(&self) -> Result<String>;

    /// Synthetic in-memory files answer true.
    fn is_light(&self) -> bool {
        false
    }

    /// The language a light file was created with, if any.
    fn light_language(&self) -> Option<Language> {
        None
    }

    /// The in-memory text of a light file.
    fn light_text(&self) -> Option<Arc<str>> {
        None
    }
}
