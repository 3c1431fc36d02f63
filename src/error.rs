//! Domain-specific error types for the backup engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`PathError`],
//! [`ManifestError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DottyError
//! ├── Path(PathError)         — home lookup, existence probes
//! ├── Manifest(ManifestError) — manifest read/decode/append failures
//! └── Copy(CopyError)         — per-stage copy failures
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the backup engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum DottyError {
    /// Path resolution error (home lookup, existence probe, access).
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Manifest error (read, decode, append, write-back).
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Copy error (open, create, transfer, flush).
    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),
}

/// Errors that arise while resolving and probing paths.
#[derive(Error, Debug)]
pub enum PathError {
    /// The current user's home directory could not be determined.
    #[error("cannot determine home directory")]
    NoHome,

    /// The resolved path does not exist on disk.
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),

    /// Any other I/O failure while probing the path (permissions, etc.).
    #[error("cannot access {path}: {source}")]
    Io {
        /// Path that could not be probed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from reading or mutating the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest location failed to resolve (missing file, bad access).
    #[error(transparent)]
    Path(#[from] PathError),

    /// The manifest file could not be read.
    #[error("cannot read manifest {path}: {source}")]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest document is not valid JSON or not the expected shape.
    #[error("manifest {path} is malformed: {message}")]
    Malformed {
        /// Manifest path.
        path: PathBuf,
        /// Decoder diagnostic.
        message: String,
    },

    /// The updated manifest could not be written back.
    #[error("cannot write manifest {path}: {source}")]
    Write {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise during a single file copy, one variant per stage.
///
/// The stages exist for diagnostics only — callers treat every variant the
/// same way (the copy failed).
#[derive(Error, Debug)]
pub enum CopyError {
    /// The source file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination file could not be created or truncated.
    #[error("cannot create {path}: {source}")]
    Create {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The byte transfer failed mid-copy. A partial destination file may
    /// remain on disk.
    #[error("copy to {path} interrupted: {source}")]
    Transfer {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination file could not be flushed to stable storage.
    #[error("flush of {path} failed: {source}")]
    Flush {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // PathError
    // -----------------------------------------------------------------------

    #[test]
    fn path_error_no_home_display() {
        let e = PathError::NoHome;
        assert_eq!(e.to_string(), "cannot determine home directory");
    }

    #[test]
    fn path_error_not_found_display() {
        let e = PathError::NotFound(PathBuf::from("/home/user/.missing"));
        assert_eq!(e.to_string(), "path does not exist: /home/user/.missing");
    }

    #[test]
    fn path_error_io_has_source() {
        use std::error::Error as StdError;
        let e = PathError::Io {
            path: PathBuf::from("/root/.secret"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/root/.secret"));
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // ManifestError
    // -----------------------------------------------------------------------

    #[test]
    fn manifest_error_malformed_display() {
        let e = ManifestError::Malformed {
            path: PathBuf::from("/home/user/.config/dotty/config.json"),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(e.to_string().contains("is malformed"));
        assert!(e.to_string().contains("config.json"));
    }

    #[test]
    fn manifest_error_from_path_error_is_transparent() {
        let e: ManifestError = PathError::NotFound(PathBuf::from("/nope")).into();
        assert_eq!(e.to_string(), "path does not exist: /nope");
    }

    // -----------------------------------------------------------------------
    // CopyError
    // -----------------------------------------------------------------------

    #[test]
    fn copy_error_stage_displays() {
        let mk = |kind: io::ErrorKind| io::Error::new(kind, "boom");
        let open = CopyError::Open {
            path: PathBuf::from("/src/.f"),
            source: mk(io::ErrorKind::NotFound),
        };
        let create = CopyError::Create {
            path: PathBuf::from("/dst/.f"),
            source: mk(io::ErrorKind::PermissionDenied),
        };
        assert!(open.to_string().starts_with("cannot open"));
        assert!(create.to_string().starts_with("cannot create"));
    }

    // -----------------------------------------------------------------------
    // DottyError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn dotty_error_from_path_error() {
        let e: DottyError = PathError::NoHome.into();
        assert!(e.to_string().contains("Path error"));
    }

    #[test]
    fn dotty_error_from_manifest_error() {
        let e: DottyError = ManifestError::Malformed {
            path: PathBuf::from("c.json"),
            message: "bad".to_string(),
        }
        .into();
        assert!(e.to_string().contains("Manifest error"));
    }

    #[test]
    fn dotty_error_from_copy_error() {
        let e: DottyError = CopyError::Flush {
            path: PathBuf::from("/dst/.f"),
            source: io::Error::other("disk full"),
        }
        .into();
        assert!(e.to_string().contains("Copy error"));
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<DottyError>();
        assert_send_sync::<PathError>();
        assert_send_sync::<ManifestError>();
        assert_send_sync::<CopyError>();
    }

    // -----------------------------------------------------------------------
    // anyhow conversion
    // -----------------------------------------------------------------------

    #[test]
    fn typed_errors_convert_to_anyhow() {
        let _e: anyhow::Error = PathError::NoHome.into();
        let _e: anyhow::Error = ManifestError::Malformed {
            path: PathBuf::from("c.json"),
            message: "bad".to_string(),
        }
        .into();
        let _e: anyhow::Error = CopyError::Open {
            path: PathBuf::from("/src/.f"),
            source: io::Error::other("x"),
        }
        .into();
    }
}
