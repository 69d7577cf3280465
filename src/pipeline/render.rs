//! Markdown rendering: raw Markdown bytes → HTML.
//!
//! pulldown-cmark implements CommonMark; tables, strikethrough and heading
//! attributes are switched on to cover the usual "common extensions"
//! dialect. The output is only an intermediate form consumed by
//! [`super::strip`], so no sanitising or pretty-printing happens here.

use pulldown_cmark::{html, Options, Parser};
use tracing::debug;

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    opts
}

/// Render Markdown source to HTML.
///
/// Pure and infallible: invalid UTF-8 sequences are replaced with U+FFFD
/// before parsing rather than rejected.
pub fn render_markdown(source: &[u8]) -> String {
    let text = String::from_utf8_lossy(source);
    let parser = Parser::new_ext(&text, options());

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, parser);
    debug!("Rendered {} bytes of Markdown to {} bytes of HTML", source.len(), out.len());
    out
}
