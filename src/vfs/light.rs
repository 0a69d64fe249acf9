//! Synthetic in-memory files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use smol_str::SmolStr;

use super::{Charset, FileSystemKind, VirtualFile};
use crate::base::stamp::current_time;
use crate::base::{FileId, UserDataHolder};
use crate::error::Result;
use crate::lang::{FileType, Language};

/// A file that lives only in memory.
///
/// Light files are never physical: providers over them do not take part in
/// project events and register themselves with the file manager lazily.
#[derive(Debug)]
pub struct LightVirtualFile {
    id: FileId,
    name: SmolStr,
    path: PathBuf,
    file_type: FileType,
    language: Option<Language>,
    charset: Charset,
    content: RwLock<Arc<str>>,
    stamp: AtomicU64,
    original: Option<Arc<dyn VirtualFile>>,
    user_data: UserDataHolder,
}

impl LightVirtualFile {
    pub fn new(name: impl Into<SmolStr>, file_type: FileType, content: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self {
            id: FileId::next(),
            path: PathBuf::from(format!("/{name}")),
            name,
            file_type,
            language: None,
            charset: Charset::default(),
            content: RwLock::new(content.into()),
            stamp: AtomicU64::new(current_time()),
            original: None,
            user_data: UserDataHolder::new(),
        }
    }

    /// Declare the language of this file, bypassing language resolution.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_stamp(self, stamp: u64) -> Self {
        self.stamp.store(stamp, Ordering::Release);
        self
    }

    /// Remember the file this one was copied from.
    pub fn with_original(mut self, original: Arc<dyn VirtualFile>) -> Self {
        self.original = Some(original);
        self
    }

    pub fn content(&self) -> Arc<str> {
        self.content.read().clone()
    }

    /// Replace the text and bump the modification stamp.
    pub fn set_content(&self, content: impl Into<Arc<str>>) {
        *self.content.write() = content.into();
        self.stamp.store(current_time(), Ordering::Release);
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    pub fn original_file(&self) -> Option<&Arc<dyn VirtualFile>> {
        self.original.as_ref()
    }
}

impl VirtualFile for LightVirtualFile {
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
        self.charset.encoded_len(&self.content.read())
    }

    fn charset(&self) -> Charset {
        self.charset
    }

    fn parent(&self) -> Option<Arc<dyn VirtualFile>> {
        None
    }

    fn modification_stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }

    fn user_data(&self) -> &UserDataHolder {
        &self.user_data
    }

    fn file_system(&self) -> FileSystemKind {
        FileSystemKind::NonPhysical
    }

    fn load_text(&self) -> Result<String> {
        Ok(self.content.read().to_string())
    }

    fn is_light(&self) -> bool {
        true
    }

    fn light_language(&self) -> Option<Language> {
        self.language.clone()
    }

    fn light_text(&self) -> Option<Arc<str>> {
        Some(self.content())
    }
}
