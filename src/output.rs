//! Result types returned by the merge entry points.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome for one discovered file, in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Path as yielded by the directory walk.
    pub path: PathBuf,
    /// 1-indexed physical PDF page this file's text starts on.
    /// `None` when the file was skipped.
    pub start_page: Option<usize>,
    /// Physical pages used by this file (more than one on overflow).
    pub page_count: usize,
    /// Byte length of the tag-stripped text.
    pub text_len: usize,
    /// Set when the file could not be read.
    pub error: Option<FileError>,
}

impl FileResult {
    pub fn is_merged(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a merge run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeStats {
    /// Files matching the marker extension.
    pub discovered_files: usize,
    /// Files that produced a page.
    pub merged_files: usize,
    /// Files skipped because they could not be read.
    pub failed_files: usize,
    /// Physical pages in the PDF (≥ `merged_files` when text overflows).
    pub total_pages: usize,
    pub discovery_duration_ms: u64,
    pub total_duration_ms: u64,
    /// Per-file outcomes in discovery order.
    pub files: Vec<FileResult>,
}

impl MergeStats {
    /// Errors of all skipped files, in discovery order.
    pub fn errors(&self) -> impl Iterator<Item = &FileError> {
        self.files.iter().filter_map(|f| f.error.as_ref())
    }
}
