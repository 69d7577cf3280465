//! File discovery: walk a directory tree and collect Markdown sources.
//!
//! The walk is depth-first with each directory's entries sorted by file
//! name, so the resulting order — and therefore the page order of the merged
//! PDF — is the same on every platform and every run.
//!
//! Any traversal error aborts discovery. Skipping an unreadable subtree would
//! silently drop pages from the output, so the caller gets a
//! [`MergeError::Traversal`] instead and nothing is converted.

use crate::config::MARKER_EXTENSION;
use crate::error::MergeError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Recursively collect every file under `root` whose name ends in `.md`.
///
/// Directories are never returned, even when their name ends in `.md`.
/// Symlinks are not followed but are returned when their own name matches;
/// a dangling one then fails at read time like any other unreadable file.
///
/// # Errors
/// [`MergeError::Traversal`] if `root` cannot be read or any subdirectory
/// fails to list.
pub fn discover_markdown_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, MergeError> {
    let root = root.as_ref();
    info!("Scanning {} for .{} files", root.display(), MARKER_EXTENSION);

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| MergeError::traversal(root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        if has_marker_extension(entry.path()) {
            debug!("Found {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    info!("Discovered {} Markdown files", files.len());
    Ok(files)
}

/// `true` when the final path component ends in `.` + [`MARKER_EXTENSION`].
///
/// Exact, case-sensitive suffix match on the raw file name, so `.md` on its
/// own qualifies while `notes.MD` and `notes.md.bak` do not.
pub fn has_marker_extension(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.as_encoded_bytes();
    let ext = MARKER_EXTENSION.as_bytes();
    name.len() > ext.len()
        && name.ends_with(ext)
        && name[name.len() - ext.len() - 1] == b'.'
}
