//! Construction of parsed files.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::ViewProvider;
use crate::error::{Result, ViewError};
use crate::lang::{FileType, Language};
use crate::psi::ParsedFile;
use crate::vfs::VirtualFile;

/// Build the parsed file for `provider`.
///
/// Returns `Ok(None)` for directories, ignored files and physical files
/// outside the project. Cancellation is returned as an error; any other
/// failure is logged and yields `Ok(None)` so a later call can retry.
pub fn create_file(provider: &ViewProvider) -> Result<Option<ParsedFile>> {
    match try_create_file(provider) {
        Ok(file) => Ok(file),
        Err(err) if err.is_cancelled() => Err(err),
        Err(err) => {
            tracing::error!(
                file = %provider.virtual_file().path().display(),
                language = %provider.base_language(),
                error = %err,
                "cannot create parsed file"
            );
            Ok(None)
        }
    }
}

fn try_create_file(provider: &ViewProvider) -> Result<Option<ParsedFile>> {
    let file = provider.virtual_file();
    if file.is_directory() || is_ignored(provider) {
        return Ok(None);
    }

    let project = provider.project();
    if provider.is_physical() && file.is_in_local_file_system() {
        let Some(parent) = file.parent() else {
            return Ok(None);
        };
        if project.directory_index().find_directory(parent.as_ref()).is_none() {
            let index = project.index_facade();
            if !index.is_in_library_source(file.as_ref())
                && !index.is_in_library_classes(file.as_ref())
            {
                return Ok(None);
            }
        }
    }

    create_file_of_type(provider, &file.file_type())
}

fn is_ignored(provider: &ViewProvider) -> bool {
    let file = provider.virtual_file();
    !file.is_light() && provider.project().file_types().is_file_ignored(file.as_ref())
}

/// Pick the parsed file variant for a file of `file_type`.
pub fn create_file_of_type(
    provider: &ViewProvider,
    file_type: &FileType,
) -> Result<Option<ParsedFile>> {
    let project = provider.project();
    let file = provider.virtual_file();
    project.check_canceled()?;

    if file_type.is_binary() || file.is_special() {
        return Ok(Some(ParsedFile::binary(provider)));
    }
    if !project.limits().is_too_large_for_intelligence(file.as_ref()) {
        if let Some(parsed) = create_language_file(provider, provider.base_language())? {
            return Ok(Some(parsed));
        }
    }
    if project.limits().is_too_large_for_content_loading(file.as_ref()) {
        return Ok(Some(ParsedFile::large_plain_text(provider)));
    }
    Ok(Some(ParsedFile::plain_text(provider)))
}

fn create_language_file(provider: &ViewProvider, language: &Language) -> Result<Option<ParsedFile>> {
    if language != provider.base_language() {
        return Ok(None);
    }
    let Some(definition) = provider.project().parser_definitions().for_language(language) else {
        return Ok(None);
    };

    match panic::catch_unwind(AssertUnwindSafe(|| definition.create_file(provider))) {
        Ok(result) => result,
        Err(payload) => Err(ViewError::ParserPanicked {
            file: provider.virtual_file().name().into(),
            language: language.clone(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}
