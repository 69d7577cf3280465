//! Progress-callback trait for per-file merge events.
//!
//! Inject an [`Arc<dyn MergeProgressCallback>`] via
//! [`crate::config::MergeConfigBuilder::progress_callback`] to receive
//! events as the driver walks through the discovered files. The CLI uses this
//! to print the `Processing file: …` lines and drive its progress bar; library
//! callers can forward the events wherever they like.
//!
//! # Example
//!
//! ```rust
//! use md2pdf_merge::{MergeConfig, MergeProgressCallback};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     merged: AtomicUsize,
//! }
//!
//! impl MergeProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, _index: usize, _total: usize, path: &Path, text_len: usize) {
//!         self.merged.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{} ({} chars)", path.display(), text_len);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { merged: AtomicUsize::new(0) });
//!
//! let config = MergeConfig::builder()
//!     .progress_callback(counter as Arc<dyn MergeProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the merge driver as it processes each file.
///
/// Events arrive strictly in discovery order from a single thread; the
/// `Send + Sync` bound only lets the callback live in a shared [`Arc`].
/// All methods have default no-op implementations.
pub trait MergeProgressCallback: Send + Sync {
    /// Called once after discovery, before any file is read.
    fn on_merge_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a file is read.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position in discovery order
    /// * `total` — number of discovered files
    /// * `path`  — the file about to be processed
    fn on_file_start(&self, index: usize, total: usize, path: &Path) {
        let _ = (index, total, path);
    }

    /// Called after a file's page has been appended.
    ///
    /// `text_len` is the byte length of the tag-stripped text.
    fn on_file_complete(&self, index: usize, total: usize, path: &Path, text_len: usize) {
        let _ = (index, total, path, text_len);
    }

    /// Called when a file could not be read and was skipped.
    fn on_file_error(&self, index: usize, total: usize, path: &Path, error: &str) {
        let _ = (index, total, path, error);
    }

    /// Called once after every discovered file has been attempted.
    ///
    /// # Arguments
    /// * `total_files` — number of discovered files
    /// * `merged`      — files that produced a page
    fn on_merge_complete(&self, total_files: usize, merged: usize) {
        let _ = (total_files, merged);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl MergeProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::MergeConfig`].
pub type ProgressCallback = Arc<dyn MergeProgressCallback>;
