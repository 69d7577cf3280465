//! Pipeline stages for Markdown-to-PDF merging.
//!
//! Each submodule implements exactly one transformation step so each can be
//! tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ render ──▶ strip ──▶ assemble
//! (walkdir)   (pulldown)  (regex)   (printpdf, wrap)
//! ```
//!
//! 1. [`discover`] — walk the input tree, collect `.md` paths in sorted
//!    depth-first order; any traversal error is fatal
//! 2. [`render`]   — Markdown bytes → HTML
//! 3. [`strip`]    — HTML → plain text by removing `<…>` runs
//! 4. [`assemble`] — one page per file, word-wrapped via [`wrap`], with
//!    automatic continuation pages on overflow

pub mod assemble;
pub mod discover;
pub mod render;
pub mod strip;
pub mod wrap;

/// Render Markdown and strip the resulting tags: the full per-file text
/// transform.
pub fn markdown_to_text(source: &[u8]) -> String {
    strip::strip_tags(&render::render_markdown(source))
}
