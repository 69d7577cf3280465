//! # md2pdf-merge
//!
//! Merge a directory tree of Markdown files into a single PDF, one page per
//! file.
//!
//! ## Pipeline Overview
//!
//! ```text
//! directory
//!  │
//!  ├─ 1. Discover  walk the tree, collect *.md in sorted depth-first order
//!  ├─ 2. Read      whole file into memory; unreadable files are skipped
//!  ├─ 3. Render    Markdown → HTML (pulldown-cmark)
//!  ├─ 4. Strip     remove every <…> tag, keep everything else verbatim
//!  ├─ 5. Assemble  new page per file, word-wrapped Helvetica text
//!  └─ 6. Write     serialise once, rename into place
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf_merge::{merge_to_file, MergeConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stats = merge_to_file("docs", "merged_output.pdf", &MergeConfig::default())?;
//!     for err in stats.errors() {
//!         eprintln!("{err}");
//!     }
//!     println!("{} pages", stats.total_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    Margins, MergeConfig, MergeConfigBuilder, PageLayout, PageSize, DEFAULT_OUTPUT,
    MARKER_EXTENSION,
};
pub use error::{FileError, MergeError};
pub use merge::{merge, merge_to_file, MergedDocument};
pub use output::{FileResult, MergeStats};
pub use pipeline::assemble::PdfAssembler;
pub use pipeline::discover::discover_markdown_files;
pub use pipeline::markdown_to_text;
pub use pipeline::render::render_markdown;
pub use pipeline::strip::strip_tags;
pub use progress::{MergeProgressCallback, NoopProgressCallback, ProgressCallback};
