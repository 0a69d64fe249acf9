//! Per-project registry of view providers.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::FileId;
use crate::provider::ViewProvider;
use crate::vfs::VirtualFile;

/// Maps files to their view providers.
///
/// Providers are held weakly: a provider nobody else references is dropped
/// and its entry is pruned on the next insertion.
#[derive(Debug, Default)]
pub struct FileManager {
    providers: RwLock<FxHashMap<FileId, Weak<ViewProvider>>>,
}

impl FileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live provider registered for `file`, if any.
    pub fn cached_view_provider(&self, file: &dyn VirtualFile) -> Option<Arc<ViewProvider>> {
        self.providers.read().get(&file.id())?.upgrade()
    }

    /// Register `provider` for `file`, or clear the registration.
    pub fn set_view_provider(&self, file: &dyn VirtualFile, provider: Option<&Arc<ViewProvider>>) {
        let mut providers = self.providers.write();
        match provider {
            Some(provider) => {
                providers.retain(|_, weak| weak.strong_count() > 0);
                providers.insert(file.id(), Arc::downgrade(provider));
                tracing::debug!(file = file.name(), "view provider registered");
            }
            None => {
                providers.remove(&file.id());
            }
        }
    }

    /// The registered provider for `file`, registering `create()` when there is none.
    ///
    /// `create` runs without the registry locked. When two callers race, the
    /// first registration wins and both get it.
    pub fn get_or_insert_with(
        &self,
        file: &dyn VirtualFile,
        create: impl FnOnce() -> Arc<ViewProvider>,
    ) -> Arc<ViewProvider> {
        if let Some(provider) = self.cached_view_provider(file) {
            return provider;
        }
        let created = create();
        let mut providers = self.providers.write();
        if let Some(existing) = providers.get(&file.id()).and_then(Weak::upgrade) {
            return existing;
        }
        providers.retain(|_, weak| weak.strong_count() > 0);
        providers.insert(file.id(), Arc::downgrade(&created));
        created
    }

    /// Number of registered providers that are still alive.
    pub fn len(&self) -> usize {
        self.providers
            .read()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
