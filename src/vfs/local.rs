//! Files on the local disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use smol_str::SmolStr;

use super::{Charset, FileSystemKind, VirtualFile};
use crate::base::stamp::current_time;
use crate::base::{FileId, UserDataHolder};
use crate::error::Result;
use crate::lang::{FileType, FileTypeRegistry};

/// A file or directory on the local file system.
///
/// Attributes that can change on disk (length, content) are read live;
/// the modification stamp only moves when [`refresh`](Self::refresh) is called.
#[derive(Debug)]
pub struct LocalFile {
    id: FileId,
    path: PathBuf,
    name: SmolStr,
    file_type: FileType,
    charset: Charset,
    is_directory: bool,
    is_special: bool,
    stamp: AtomicU64,
    user_data: UserDataHolder,
}

impl LocalFile {
    /// Open the file at `path`, taking its type from `registry`.
    pub fn open(path: impl AsRef<Path>, registry: &FileTypeRegistry) -> Result<Arc<LocalFile>> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|name| SmolStr::new(name.to_string_lossy()))
            .unwrap_or_default();
        let file_type = if metadata.is_dir() {
            FileType::unknown()
        } else {
            registry.file_type_for_name(&name)
        };
        Ok(Arc::new(Self {
            id: FileId::next(),
            path: path.to_path_buf(),
            name,
            file_type,
            charset: Charset::default(),
            is_directory: metadata.is_dir(),
            is_special: is_special(&metadata.file_type()),
            stamp: AtomicU64::new(current_time()),
            user_data: UserDataHolder::new(),
        }))
    }

    /// Note that the file changed on disk.
    pub fn refresh(&self) {
        self.stamp.store(current_time(), Ordering::Release);
    }
}

#[cfg(unix)]
fn is_special(file_type: &fs::FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_fifo()
        || file_type.is_socket()
        || file_type.is_char_device()
        || file_type.is_block_device()
}

#[cfg(not(unix))]
fn is_special(_file_type: &fs::FileType) -> bool {
    false
}

impl VirtualFile for LocalFile {
    fn id(&self) -> FileId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn file_type(&self) -> FileType {
        self.file_type.clone()
    }

    fn length(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn charset(&self) -> Charset {
        self.charset
    }

    fn parent(&self) -> Option<Arc<dyn VirtualFile>> {
        let parent = self.path.parent()?;
        let directory = LocalFile::open(parent, &FileTypeRegistry::empty()).ok()?;
        Some(directory)
    }

    fn modification_stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }

    fn user_data(&self) -> &UserDataHolder {
        &self.user_data
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }

    fn is_special(&self) -> bool {
        self.is_special
    }

    fn file_system(&self) -> FileSystemKind {
        FileSystemKind::Local
    }

    fn load_text(&self) -> Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(self.charset.decode(&bytes))
    }
}
