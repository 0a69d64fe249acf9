//! Hand-built virtual files for cases the file system cannot easily produce.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use syster_view::Result;
use syster_view::base::{FileId, UserDataHolder};
use syster_view::lang::FileType;
use syster_view::vfs::{Charset, FileSystemKind, VirtualFile};

/// A device-like file with a text file type.
#[derive(Debug)]
pub struct SpecialFile {
    id: FileId,
    path: PathBuf,
    file_type: FileType,
    user_data: UserDataHolder,
}

impl SpecialFile {
    pub fn new(name: &str, file_type: FileType) -> Arc<Self> {
        Arc::new(Self {
            id: FileId::next(),
            path: PathBuf::from("/dev").join(name),
            file_type,
            user_data: UserDataHolder::new(),
        })
    }
}

impl VirtualFile for SpecialFile {
    fn id(&self) -> FileId {
        self.id
    }

    fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn file_type(&self) -> FileType {
        self.file_type.clone()
    }

    fn length(&self) -> u64 {
        0
    }

    fn charset(&self) -> Charset {
        Charset::Utf8
    }

    fn parent(&self) -> Option<Arc<dyn VirtualFile>> {
        None
    }

    fn modification_stamp(&self) -> u64 {
        1
    }

    fn user_data(&self) -> &UserDataHolder {
        &self.user_data
    }

    fn is_special(&self) -> bool {
        true
    }

    fn file_system(&self) -> FileSystemKind {
        FileSystemKind::NonPhysical
    }

    fn load_text(&self) -> Result<String> {
        Ok(String::new())
    }
}
