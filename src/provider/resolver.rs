use crate::lang::{FileType, FileTypeKind, Language};
use crate::project::Project;
use crate::vfs::VirtualFile;

/// The language a provider over `file` is bound to.
///
/// The checks run in a fixed order: a light file's declared language, then
/// binary types, then the intellisense size limit, and only then language
/// substitution.
pub fn base_language(file: &dyn VirtualFile, project: &Project, file_type: &FileType) -> Language {
    if file.is_light() {
        if let Some(language) = file.light_language() {
            return language;
        }
    }

    if file_type.is_binary() {
        return Language::any();
    }
    if project.limits().is_too_large_for_intelligence(file) {
        return Language::plain_text();
    }

    match file_type.kind() {
        FileTypeKind::Language(language) => project.substitutors().substitute(language, file, project),
        FileTypeKind::Binary | FileTypeKind::Text => Language::plain_text(),
    }
}
