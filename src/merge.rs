//! Merge entry points: directory in, one PDF out.
//!
//! [`merge`] runs discovery and builds the document in memory;
//! [`merge_to_file`] additionally writes it out. The document is serialised
//! exactly once, at the end, so a failed write loses the whole run but never
//! leaves a partial file behind.

use crate::config::MergeConfig;
use crate::error::{FileError, MergeError};
use crate::output::{FileResult, MergeStats};
use crate::pipeline::assemble::PdfAssembler;
use crate::pipeline::{discover, markdown_to_text};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A merged document that has not been written yet.
pub struct MergedDocument {
    assembler: PdfAssembler,
    pub stats: MergeStats,
}

impl MergedDocument {
    /// Serialise the PDF into memory.
    pub fn into_bytes(self) -> Result<Vec<u8>, MergeError> {
        self.assembler.finish_to_bytes()
    }

    /// Serialise the PDF and write it to `output`, returning the run stats.
    pub fn write_to(self, output: impl AsRef<Path>) -> Result<MergeStats, MergeError> {
        let output = output.as_ref();
        self.assembler.finish(output)?;
        info!("Merged {} files into {}", self.stats.merged_files, output.display());
        Ok(self.stats)
    }
}

/// Discover every `.md` file under `input_dir` and lay each out on its own
/// page, in discovery order.
///
/// Files that cannot be read are skipped and recorded in
/// [`MergeStats::files`]; they never make this function fail.
///
/// # Errors
/// - [`MergeError::Traversal`] if the tree cannot be walked
/// - [`MergeError::InvalidConfig`] / [`MergeError::PdfEncoding`] if the
///   document cannot be created
pub fn merge(
    input_dir: impl AsRef<Path>,
    config: &MergeConfig,
) -> Result<MergedDocument, MergeError> {
    let total_start = Instant::now();
    let input_dir = input_dir.as_ref();
    info!("Starting merge: {}", input_dir.display());

    // ── Step 1: Discover ─────────────────────────────────────────────────
    let discovery_start = Instant::now();
    let paths = discover::discover_markdown_files(input_dir)?;
    let discovery_duration_ms = discovery_start.elapsed().as_millis() as u64;

    // ── Step 2: Create the document ──────────────────────────────────────
    let mut assembler = PdfAssembler::new(&config.title, config.layout)?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_merge_start(paths.len());
    }

    // ── Step 3: Append one page per readable file ────────────────────────
    let total = paths.len();
    let mut files = Vec::with_capacity(total);
    for (i, path) in paths.into_iter().enumerate() {
        files.push(process_file(&mut assembler, path, i + 1, total, config));
    }

    let merged = files.iter().filter(|f| f.is_merged()).count();
    let stats = MergeStats {
        discovered_files: total,
        merged_files: merged,
        failed_files: total - merged,
        total_pages: assembler.physical_pages(),
        discovery_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        files,
    };

    info!(
        "Merge complete: {}/{} files, {} pages, {}ms",
        merged, total, stats.total_pages, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_merge_complete(total, merged);
    }

    Ok(MergedDocument { assembler, stats })
}

/// Merge `input_dir` and write the PDF to `output`.
///
/// The output's parent directory is not created; a missing directory is an
/// [`MergeError::OutputWriteFailed`].
pub fn merge_to_file(
    input_dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &MergeConfig,
) -> Result<MergeStats, MergeError> {
    merge(input_dir, config)?.write_to(output)
}

fn process_file(
    assembler: &mut PdfAssembler,
    path: PathBuf,
    index: usize,
    total: usize,
    config: &MergeConfig,
) -> FileResult {
    let cb = config.progress_callback.as_ref();
    if let Some(cb) = cb {
        cb.on_file_start(index, total, &path);
    }
    debug!("Processing file {}/{}: {}", index, total, path.display());

    let content = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let error = FileError::from_io(&path, &e);
            warn!("{}", error);
            if let Some(cb) = cb {
                cb.on_file_error(index, total, &path, &error.to_string());
            }
            return FileResult {
                path,
                start_page: None,
                page_count: 0,
                text_len: 0,
                error: Some(error),
            };
        }
    };

    let text = markdown_to_text(&content);
    let before = assembler.physical_pages();
    let start_page = assembler.add_page(&text);

    if let Some(cb) = cb {
        cb.on_file_complete(index, total, &path, text.len());
    }

    FileResult {
        path,
        start_page: Some(start_page),
        page_count: assembler.physical_pages() - before,
        text_len: text.len(),
        error: None,
    }
}
