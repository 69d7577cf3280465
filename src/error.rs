//! Error types for the md2pdf-merge library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MergeError`] — **Fatal**: the merge cannot proceed or its result
//!   cannot be saved (unreadable directory tree, output path not writable,
//!   invalid configuration). Returned as `Err(MergeError)` from the top-level
//!   `merge*` functions.
//!
//! * [`FileError`] — **Non-fatal**: a single Markdown file could not be read.
//!   That file contributes no page, the run continues, and the error is
//!   stored inside [`crate::output::FileResult`].
//!
//! Traversal errors and read errors are deliberately different types: a
//! broken subtree aborts discovery before any page is built, while a broken
//! file only drops its own page.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// All fatal errors returned by the md2pdf-merge library.
///
/// File-level failures use [`FileError`] and are stored in
/// [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum MergeError {
    // ── Discovery errors ──────────────────────────────────────────────────
    /// Walking the input tree failed at `path` (missing root, unreadable
    /// subdirectory, filesystem loop).
    #[error("Error walking through directory '{}': {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// printpdf refused to build or serialise the document.
    #[error("PDF generation failed: {0}")]
    PdfEncoding(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MergeError {
    /// Wrap a walkdir error, keeping the path it failed on (or the root
    /// when walkdir could not attach one).
    pub(crate) fn traversal(root: &Path, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        MergeError::Traversal { path, source }
    }

    pub(crate) fn output_write(path: &Path, source: std::io::Error) -> Self {
        MergeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A non-fatal error for a single input file.
///
/// Stored alongside [`crate::output::FileResult`] when a file is skipped.
/// The merge always continues with the next file.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FileError {
    /// The file disappeared between discovery and reading, or is a dangling
    /// symlink.
    #[error("Error reading file {}: not found", path.display())]
    NotFound { path: PathBuf },

    /// The process lacks read permission on the file.
    #[error("Error reading file {}: permission denied", path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other read failure.
    #[error("Error reading file {}: {detail}", path.display())]
    ReadFailed { path: PathBuf, detail: String },
}

impl FileError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, err: &std::io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            _ => FileError::ReadFailed {
                path,
                detail: err.to_string(),
            },
        }
    }

    /// Path of the file that failed.
    pub fn path(&self) -> &Path {
        match self {
            FileError::NotFound { path }
            | FileError::PermissionDenied { path }
            | FileError::ReadFailed { path, .. } => path,
        }
    }
}
