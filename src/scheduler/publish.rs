use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};

/// Atomically replace `published` with the fully written `staging` file.
///
/// Readers of `published` see either the old file or the new one, never a mix. A rename that
/// fails (for example across filesystems) falls back to copying beside `published` and renaming
/// that copy into place.
pub fn publish(staging: &Path, published: &Path) -> ReelResult<()> {
    let meta = std::fs::metadata(staging).map_err(|e| {
        ReelError::publish(format!("staged file '{}' unavailable: {e}", staging.display()))
    })?;
    if !meta.is_file() || meta.len() == 0 {
        return Err(ReelError::publish(format!(
            "staged file '{}' is empty or not a regular file",
            staging.display()
        )));
    }
    if let Some(parent) = published.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReelError::publish(format!(
                "failed to create publish directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    match std::fs::rename(staging, published) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(error = %rename_err, "direct rename failed, copying beside target");
            let partial = partial_path(published);
            let copied = std::fs::copy(staging, &partial)
                .and_then(|_| std::fs::rename(&partial, published));
            if let Err(e) = copied {
                let _ = std::fs::remove_file(&partial);
                return Err(ReelError::publish(format!(
                    "failed to replace '{}' with '{}': {e}",
                    published.display(),
                    staging.display()
                )));
            }
            discard_staging(staging);
            Ok(())
        }
    }
}

/// Remove a leftover staging file, if any.
pub fn discard_staging(staging: &Path) {
    match std::fs::remove_file(staging) {
        Ok(()) => tracing::debug!(path = %staging.display(), "removed staging file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %staging.display(), error = %e, "could not remove staging file"),
    }
}

fn partial_path(published: &Path) -> PathBuf {
    let mut name = published
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    published.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/publish.rs"]
mod tests;
