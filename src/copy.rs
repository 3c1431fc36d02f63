//! Dotfile-name predicate and the single-file copy primitive.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::CopyError;

/// Whether the final path component names a dotfile (starts with `.`).
///
/// Pure predicate, no I/O. `.` and `..` are **not** dotfiles: they name
/// directories, not files, and `Path::file_name` yields `None` for both.
#[must_use]
pub fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Copy `source` into `dest_dir`, keeping only the base filename.
///
/// The source's directory structure is discarded — the leaf file is placed
/// directly under `dest_dir`, silently replacing any existing file of the
/// same name. Content is flushed to stable storage before success is
/// reported. Both handles are closed on every exit path by scope.
///
/// # Errors
///
/// Returns a [`CopyError`] naming the failed stage: `Open`, `Create`,
/// `Transfer` (a partial destination file may remain), or `Flush`.
pub fn copy_file(source: &Path, dest_dir: &Path) -> Result<u64, CopyError> {
    let mut src = File::open(source).map_err(|e| CopyError::Open {
        path: source.to_path_buf(),
        source: e,
    })?;

    let Some(name) = source.file_name() else {
        return Err(CopyError::Open {
            path: source.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        });
    };
    let target = dest_dir.join(name);

    let mut dst = File::create(&target).map_err(|e| CopyError::Create {
        path: target.clone(),
        source: e,
    })?;

    let bytes = io::copy(&mut src, &mut dst).map_err(|e| CopyError::Transfer {
        path: target.clone(),
        source: e,
    })?;

    dst.sync_all().map_err(|e| CopyError::Flush {
        path: target,
        source: e,
    })?;

    Ok(bytes)
}
