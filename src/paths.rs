//! Path resolution: home-folder expansion, lexical cleaning, existence probes.
//!
//! Resolution is purely syntactic plus a single `stat` — no symlink
//! resolution and no filesystem mutation. The home directory is injected
//! through [`HomeDir`] rather than read from the environment at each call
//! site, so tests can resolve against a temp directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// The invoking user's home directory, detected once per run.
#[derive(Debug, Clone)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    /// Detect the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoHome`] when the process environment has no
    /// resolvable home directory.
    pub fn detect() -> Result<Self, PathError> {
        dirs::home_dir().map(Self).ok_or(PathError::NoHome)
    }

    /// Build a `HomeDir` from a known path (tests, overrides).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The home directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Expands and probes raw path strings against an injected [`HomeDir`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    home: &'a HomeDir,
}

impl<'a> Resolver<'a> {
    /// Create a resolver bound to `home`.
    #[must_use]
    pub const fn new(home: &'a HomeDir) -> Self {
        Self { home }
    }

    /// Substitute the home directory for a single leading `~`, then clean.
    ///
    /// Only the first, leading occurrence is substituted; any `~` later in
    /// the string is left untouched. A path without a leading `~` is only
    /// cleaned.
    #[must_use]
    pub fn expand(&self, raw: &str) -> PathBuf {
        let expanded = match raw.strip_prefix('~') {
            Some(rest) => {
                let mut s = self.home.path().as_os_str().to_os_string();
                s.push(rest);
                PathBuf::from(s)
            }
            None => PathBuf::from(raw),
        };
        clean(&expanded)
    }

    /// Expand `raw` and verify that the result exists on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] when the expanded path does not
    /// exist, or [`PathError::Io`] for any other probe failure.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, PathError> {
        let path = self.expand(raw);
        probe(&path)?;
        Ok(path)
    }
}

/// Lexically clean a path: collapse `.`, `..`, and redundant separators.
///
/// This is syntactic only — symlinks are not consulted, so `a/b/..` becomes
/// `a` even when `b` is a link elsewhere. Cleaning is idempotent.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                let last_is_root =
                    matches!(out.components().next_back(), Some(Component::RootDir));
                if last_is_normal {
                    // `..` after a normal component cancels it.
                    out.pop();
                } else if !last_is_root {
                    // Leading or stacked `..` in a relative path is kept;
                    // `/..` stays at the root.
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        // `a/..` cleans to `.`; a genuinely empty input stays empty so the
        // existence probe rejects it instead of resolving to the cwd.
        out.push(".");
    }
    out
}

/// Probe `path` for existence (any file type, symlinks followed).
///
/// # Errors
///
/// Returns [`PathError::NotFound`] when the path does not exist, or
/// [`PathError::Io`] for any other `stat` failure.
pub fn probe(path: &Path) -> Result<(), PathError> {
    match fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(PathError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(PathError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
