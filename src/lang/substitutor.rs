//! Pluggable language substitution.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::Language;
use crate::project::Project;
use crate::vfs::VirtualFile;

/// Rewrites the declared language of a file, e.g. to pick a dialect for a
/// particular project.
pub trait LanguageSubstitutor: Send + Sync {
    /// The language to use instead, or `None` to keep the declared one.
    fn language(&self, file: &dyn VirtualFile, project: &Project) -> Option<Language>;
}

impl<F> LanguageSubstitutor for F
where
    F: Fn(&dyn VirtualFile, &Project) -> Option<Language> + Send + Sync,
{
    fn language(&self, file: &dyn VirtualFile, project: &Project) -> Option<Language> {
        self(file, project)
    }
}

/// Substitutors keyed by the language they rewrite, kept in registration order.
#[derive(Default, Clone)]
pub struct LanguageSubstitutors {
    by_language: FxHashMap<Language, Vec<Arc<dyn LanguageSubstitutor>>>,
}

impl LanguageSubstitutors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        language: Language,
        substitutor: impl LanguageSubstitutor + 'static,
    ) {
        self.by_language
            .entry(language)
            .or_default()
            .push(Arc::new(substitutor));
    }

    /// Run the substitutors registered for `language`; the first answer wins.
    pub fn substitute(
        &self,
        language: &Language,
        file: &dyn VirtualFile,
        project: &Project,
    ) -> Language {
        let Some(substitutors) = self.by_language.get(language) else {
            return language.clone();
        };
        for substitutor in substitutors {
            if let Some(substituted) = substitutor.language(file, project) {
                tracing::debug!(
                    file = file.name(),
                    from = %language,
                    to = %substituted,
                    "language substituted"
                );
                return substituted;
            }
        }
        language.clone()
    }
}
